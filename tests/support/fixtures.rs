//! Canned JSON bodies mirroring real e-Connect responses, trimmed to the
//! fields the client consumes plus the extra fields the live service sends.

pub const TOKEN: &str = "00000000-0000-0000-0000-000000000000";

pub const LOGIN: &str = r#"{
    "SessionId": "00000000-0000-0000-0000-000000000000",
    "Username": "test",
    "Domain": "domain",
    "Language": "en",
    "IsActivated": true,
    "CanElevate": true,
    "AccountId": 100,
    "Redirect": false,
    "RedirectTo": "",
    "IsElevation": false
}"#;

pub const SYNC_OK: &str = r#"[
    {
        "Poller": {"Poller": 1, "Panel": 1},
        "CommandId": 5,
        "Successful": true
    }
]"#;

pub const SYNC_FAIL: &str = r#"[
    {
        "Poller": {"Poller": 1, "Panel": 1},
        "CommandId": 5,
        "Successful": false
    }
]"#;

pub const STRINGS: &str = r#"[
    {"AccountId": 1, "Class": 9, "Index": 0, "Description": "S1 Living Room", "Created": "/Date(1546004120767+0100)/", "Version": "AAAAAAAAgPc="},
    {"AccountId": 1, "Class": 9, "Index": 1, "Description": "S2 Bedroom", "Created": "/Date(1546004120770+0100)/", "Version": "AAAAAAAAgPg="},
    {"AccountId": 1, "Class": 9, "Index": 2, "Description": "S3 Outdoor", "Created": "/Date(1546004147490+0100)/", "Version": "AAAAAAAAgRs="},
    {"AccountId": 1, "Class": 10, "Index": 0, "Description": "Entryway Sensor", "Created": "/Date(1546004147493+0100)/", "Version": "AAAAAAAAgRw="},
    {"AccountId": 1, "Class": 10, "Index": 1, "Description": "Outdoor Sensor 1", "Created": "/Date(1546004147493+0100)/", "Version": "AAAAAAAAgRw="},
    {"AccountId": 1, "Class": 10, "Index": 2, "Description": "Outdoor Sensor 2", "Created": "/Date(1546004147493+0100)/", "Version": "AAAAAAAAgRw="}
]"#;

pub const AREAS: &str = r#"[
    {"Active": true,  "ActivePartial": false, "Max": false, "Activable": true,  "InUse": true,  "Id": 1, "Index": 0, "Element": 1, "CommandId": 0, "InProgress": false},
    {"Active": true,  "ActivePartial": false, "Max": false, "Activable": true,  "InUse": true,  "Id": 2, "Index": 1, "Element": 2, "CommandId": 0, "InProgress": false},
    {"Active": false, "ActivePartial": false, "Max": false, "Activable": false, "InUse": true,  "Id": 3, "Index": 2, "Element": 3, "CommandId": 0, "InProgress": false},
    {"Active": false, "ActivePartial": false, "Max": false, "Activable": true,  "InUse": false, "Id": 4, "Index": 3, "Element": 5, "CommandId": 0, "InProgress": false}
]"#;

pub const INPUTS: &str = r#"[
    {"Alarm": true,  "MemoryAlarm": false, "Excluded": false, "InUse": true,  "IsVideo": false, "Id": 1,  "Index": 0, "Element": 1, "CommandId": 0, "InProgress": false},
    {"Alarm": true,  "MemoryAlarm": false, "Excluded": false, "InUse": true,  "IsVideo": false, "Id": 2,  "Index": 1, "Element": 2, "CommandId": 0, "InProgress": false},
    {"Alarm": false, "MemoryAlarm": false, "Excluded": true,  "InUse": true,  "IsVideo": false, "Id": 3,  "Index": 2, "Element": 3, "CommandId": 0, "InProgress": false},
    {"Alarm": false, "MemoryAlarm": false, "Excluded": false, "InUse": false, "IsVideo": false, "Id": 42, "Index": 3, "Element": 4, "CommandId": 0, "InProgress": false}
]"#;

pub const UPDATES_AREAS_CHANGED: &str = r#"{
    "ConnectionStatus": false,
    "CanElevate": false,
    "Areas": true,
    "Events": false,
    "Inputs": false,
    "Outputs": false,
    "Anomalies": false,
    "HasChanges": true
}"#;

/// Login body for an installation migrated to another cluster.
pub fn login_redirect(target: &str) -> String {
    format!(
        r#"{{
            "SessionId": "redirect-session",
            "Redirect": true,
            "RedirectTo": "{target}"
        }}"#
    )
}
