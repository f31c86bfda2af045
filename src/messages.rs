//! Message type ids and the built-in entity schema table
//!
//! This is configuration data for the generic codec: one [`EntitySchema`] per
//! entity kind the device firmware exposes. Field lists are kept in field
//! number order so encoded commands come out in ascending field order.

use crate::schema::{
    CommandSchema, EntitySchema, EnumMapping, FieldSpec, HasPatternField, ListEntitiesSchema,
    RepeatedFieldSpec, StateSchema,
};
use crate::value::ValueType;

/// Message type constants
pub mod msg_types {
    #![allow(missing_docs)]

    pub const LIST_ENTITIES_BINARY_SENSOR_RESPONSE: u32 = 12;
    pub const LIST_ENTITIES_COVER_RESPONSE: u32 = 13;
    pub const LIST_ENTITIES_FAN_RESPONSE: u32 = 14;
    pub const LIST_ENTITIES_LIGHT_RESPONSE: u32 = 15;
    pub const LIST_ENTITIES_SENSOR_RESPONSE: u32 = 16;
    pub const LIST_ENTITIES_SWITCH_RESPONSE: u32 = 17;
    pub const LIST_ENTITIES_TEXT_SENSOR_RESPONSE: u32 = 18;
    pub const BINARY_SENSOR_STATE_RESPONSE: u32 = 21;
    pub const COVER_STATE_RESPONSE: u32 = 22;
    pub const FAN_STATE_RESPONSE: u32 = 23;
    pub const LIGHT_STATE_RESPONSE: u32 = 24;
    pub const SENSOR_STATE_RESPONSE: u32 = 25;
    pub const SWITCH_STATE_RESPONSE: u32 = 26;
    pub const TEXT_SENSOR_STATE_RESPONSE: u32 = 27;
    pub const COVER_COMMAND_REQUEST: u32 = 30;
    pub const FAN_COMMAND_REQUEST: u32 = 31;
    pub const LIGHT_COMMAND_REQUEST: u32 = 32;
    pub const SWITCH_COMMAND_REQUEST: u32 = 33;
    pub const LIST_ENTITIES_CAMERA_RESPONSE: u32 = 43;
    pub const CAMERA_IMAGE_RESPONSE: u32 = 44;
    pub const LIST_ENTITIES_CLIMATE_RESPONSE: u32 = 46;
    pub const CLIMATE_STATE_RESPONSE: u32 = 47;
    pub const CLIMATE_COMMAND_REQUEST: u32 = 48;
    pub const LIST_ENTITIES_NUMBER_RESPONSE: u32 = 49;
    pub const NUMBER_STATE_RESPONSE: u32 = 50;
    pub const NUMBER_COMMAND_REQUEST: u32 = 51;
    pub const LIST_ENTITIES_SELECT_RESPONSE: u32 = 52;
    pub const SELECT_STATE_RESPONSE: u32 = 53;
    pub const SELECT_COMMAND_REQUEST: u32 = 54;
    pub const LIST_ENTITIES_SIREN_RESPONSE: u32 = 55;
    pub const SIREN_STATE_RESPONSE: u32 = 56;
    pub const SIREN_COMMAND_REQUEST: u32 = 57;
    pub const LIST_ENTITIES_LOCK_RESPONSE: u32 = 58;
    pub const LOCK_STATE_RESPONSE: u32 = 59;
    pub const LOCK_COMMAND_REQUEST: u32 = 60;
    pub const LIST_ENTITIES_BUTTON_RESPONSE: u32 = 61;
    pub const BUTTON_COMMAND_REQUEST: u32 = 62;
    pub const LIST_ENTITIES_MEDIA_PLAYER_RESPONSE: u32 = 63;
    pub const MEDIA_PLAYER_STATE_RESPONSE: u32 = 64;
    pub const MEDIA_PLAYER_COMMAND_REQUEST: u32 = 65;
    pub const LIST_ENTITIES_ALARM_CONTROL_PANEL_RESPONSE: u32 = 94;
    pub const ALARM_CONTROL_PANEL_STATE_RESPONSE: u32 = 95;
    pub const ALARM_CONTROL_PANEL_COMMAND_REQUEST: u32 = 96;
    pub const LIST_ENTITIES_TEXT_RESPONSE: u32 = 97;
    pub const TEXT_STATE_RESPONSE: u32 = 98;
    pub const TEXT_COMMAND_REQUEST: u32 = 99;
    pub const LIST_ENTITIES_DATE_RESPONSE: u32 = 100;
    pub const DATE_STATE_RESPONSE: u32 = 101;
    pub const DATE_COMMAND_REQUEST: u32 = 102;
    pub const LIST_ENTITIES_TIME_RESPONSE: u32 = 103;
    pub const TIME_STATE_RESPONSE: u32 = 104;
    pub const TIME_COMMAND_REQUEST: u32 = 105;
    pub const LIST_ENTITIES_EVENT_RESPONSE: u32 = 107;
    pub const EVENT_RESPONSE: u32 = 108;
    pub const LIST_ENTITIES_VALVE_RESPONSE: u32 = 109;
    pub const VALVE_STATE_RESPONSE: u32 = 110;
    pub const VALVE_COMMAND_REQUEST: u32 = 111;
    pub const LIST_ENTITIES_DATETIME_RESPONSE: u32 = 112;
    pub const DATETIME_STATE_RESPONSE: u32 = 113;
    pub const DATETIME_COMMAND_REQUEST: u32 = 114;
    pub const LIST_ENTITIES_UPDATE_RESPONSE: u32 = 116;
    pub const UPDATE_STATE_RESPONSE: u32 = 117;
    pub const UPDATE_COMMAND_REQUEST: u32 = 118;
}

use msg_types::*;

const fn flag(name: &'static str, n: u32) -> FieldSpec {
    FieldSpec::new(name, n, ValueType::Bool)
}

const fn code(name: &'static str, n: u32) -> FieldSpec {
    FieldSpec::new(name, n, ValueType::Enum)
}

const fn uint(name: &'static str, n: u32) -> FieldSpec {
    FieldSpec::new(name, n, ValueType::Varint)
}

const fn real(name: &'static str, n: u32) -> FieldSpec {
    FieldSpec::new(name, n, ValueType::Float)
}

const fn text(name: &'static str, n: u32) -> FieldSpec {
    FieldSpec::new(name, n, ValueType::String)
}

const fn stamp(name: &'static str, n: u32) -> FieldSpec {
    FieldSpec::new(name, n, ValueType::Fixed32)
}

const fn has(name: &'static str, presence: u32, value: u32, value_type: ValueType) -> HasPatternField {
    HasPatternField::new(name, presence, value, value_type)
}

const fn many(name: &'static str, n: u32, value_type: ValueType) -> RepeatedFieldSpec {
    RepeatedFieldSpec::new(name, n, value_type)
}

const fn state(message_type: u32, device_id: u32, fields: &'static [FieldSpec]) -> StateSchema {
    StateSchema {
        message_type,
        key_field_number: 1,
        device_id_field_number: device_id,
        fields,
    }
}

const fn listing(
    message_type: u32,
    device_id: u32,
    fields: &'static [FieldSpec],
    repeated_fields: &'static [RepeatedFieldSpec],
) -> ListEntitiesSchema {
    ListEntitiesSchema {
        message_type,
        key_field_number: 2,
        name_field_number: 3,
        object_id_field_number: 1,
        device_id_field_number: device_id,
        fields,
        repeated_fields,
    }
}

const fn command(
    message_type: u32,
    device_id: u32,
    fields: &'static [FieldSpec],
    has_pattern_fields: &'static [HasPatternField],
    enum_mappings: &'static [EnumMapping],
) -> CommandSchema {
    CommandSchema {
        message_type,
        key_field_number: 1,
        device_id_field_number: device_id,
        fields,
        has_pattern_fields,
        enum_mappings,
    }
}

/// Alarm control panel
pub const ALARM_CONTROL_PANEL: EntitySchema = EntitySchema {
    kind: "alarm_control_panel",
    command: Some(command(
        ALARM_CONTROL_PANEL_COMMAND_REQUEST,
        4,
        &[code("command", 2), text("code", 3)],
        &[],
        &[EnumMapping {
            field: "command",
            tokens: &[
                ("disarm", 0),
                ("arm_away", 1),
                ("arm_home", 2),
                ("arm_night", 3),
                ("arm_vacation", 4),
                ("arm_custom_bypass", 5),
                ("trigger", 6),
            ],
        }],
    )),
    state: state(ALARM_CONTROL_PANEL_STATE_RESPONSE, 3, &[code("state", 2)]),
    list_entities: listing(
        LIST_ENTITIES_ALARM_CONTROL_PANEL_RESPONSE,
        11,
        &[
            text("icon", 5),
            flag("disabledByDefault", 6),
            code("entityCategory", 7),
            uint("supportedFeatures", 8),
            flag("requiresCode", 9),
            flag("requiresCodeToArm", 10),
        ],
        &[],
    ),
};

/// Binary sensor (read-only)
pub const BINARY_SENSOR: EntitySchema = EntitySchema {
    kind: "binary_sensor",
    command: None,
    state: state(
        BINARY_SENSOR_STATE_RESPONSE,
        4,
        &[flag("state", 2), flag("missingState", 3)],
    ),
    list_entities: listing(
        LIST_ENTITIES_BINARY_SENSOR_RESPONSE,
        10,
        &[
            text("deviceClass", 5),
            flag("isStatusBinarySensor", 6),
            flag("disabledByDefault", 7),
            text("icon", 8),
            code("entityCategory", 9),
        ],
        &[],
    ),
};

/// Button: stateless trigger, so its state shape is unassigned
pub const BUTTON: EntitySchema = EntitySchema {
    kind: "button",
    command: Some(command(BUTTON_COMMAND_REQUEST, 2, &[], &[], &[])),
    state: state(0, 0, &[]),
    list_entities: listing(
        LIST_ENTITIES_BUTTON_RESPONSE,
        9,
        &[
            text("icon", 5),
            flag("disabledByDefault", 6),
            code("entityCategory", 7),
            text("deviceClass", 8),
        ],
        &[],
    ),
};

/// Camera (read-only); the state shape is the image chunk response
pub const CAMERA: EntitySchema = EntitySchema {
    kind: "camera",
    command: None,
    state: state(CAMERA_IMAGE_RESPONSE, 4, &[text("data", 2), flag("done", 3)]),
    list_entities: listing(
        LIST_ENTITIES_CAMERA_RESPONSE,
        8,
        &[
            flag("disabledByDefault", 5),
            text("icon", 6),
            code("entityCategory", 7),
        ],
        &[],
    ),
};

/// Climate
pub const CLIMATE: EntitySchema = EntitySchema {
    kind: "climate",
    command: Some(command(
        CLIMATE_COMMAND_REQUEST,
        24,
        &[],
        &[
            has("mode", 2, 3, ValueType::Enum),
            has("targetTemperature", 4, 5, ValueType::Float),
            has("targetTemperatureLow", 6, 7, ValueType::Float),
            has("targetTemperatureHigh", 8, 9, ValueType::Float),
            has("fanMode", 12, 13, ValueType::Enum),
            has("swingMode", 14, 15, ValueType::Enum),
            has("customFanMode", 16, 17, ValueType::String),
            has("preset", 18, 19, ValueType::Enum),
            has("customPreset", 20, 21, ValueType::String),
            has("targetHumidity", 22, 23, ValueType::Float),
        ],
        &[
            EnumMapping {
                field: "mode",
                tokens: &[
                    ("off", 0),
                    ("heat_cool", 1),
                    ("cool", 2),
                    ("heat", 3),
                    ("fan_only", 4),
                    ("dry", 5),
                    ("auto", 6),
                ],
            },
            EnumMapping {
                field: "fanMode",
                tokens: &[
                    ("on", 0),
                    ("off", 1),
                    ("auto", 2),
                    ("low", 3),
                    ("medium", 4),
                    ("high", 5),
                    ("middle", 6),
                    ("focus", 7),
                    ("diffuse", 8),
                    ("quiet", 9),
                ],
            },
            EnumMapping {
                field: "swingMode",
                tokens: &[("off", 0), ("both", 1), ("vertical", 2), ("horizontal", 3)],
            },
            EnumMapping {
                field: "preset",
                tokens: &[
                    ("none", 0),
                    ("home", 1),
                    ("away", 2),
                    ("boost", 3),
                    ("comfort", 4),
                    ("eco", 5),
                    ("sleep", 6),
                    ("activity", 7),
                ],
            },
        ],
    )),
    state: state(
        CLIMATE_STATE_RESPONSE,
        16,
        &[
            code("mode", 2),
            real("currentTemperature", 3),
            real("targetTemperature", 4),
            real("targetTemperatureLow", 5),
            real("targetTemperatureHigh", 6),
            code("action", 8),
            code("fanMode", 9),
            code("swingMode", 10),
            text("customFanMode", 11),
            code("preset", 12),
            text("customPreset", 13),
            real("currentHumidity", 14),
            real("targetHumidity", 15),
        ],
    ),
    list_entities: listing(
        LIST_ENTITIES_CLIMATE_RESPONSE,
        26,
        &[
            flag("supportsCurrentTemperature", 5),
            flag("supportsTwoPointTargetTemperature", 6),
            real("visualMinTemperature", 8),
            real("visualMaxTemperature", 9),
            real("visualTargetTemperatureStep", 10),
            flag("supportsAction", 12),
            flag("disabledByDefault", 18),
            text("icon", 19),
            code("entityCategory", 20),
            real("visualCurrentTemperatureStep", 21),
            flag("supportsCurrentHumidity", 22),
            flag("supportsTargetHumidity", 23),
            real("visualMinHumidity", 24),
            real("visualMaxHumidity", 25),
        ],
        &[
            many("supportedModes", 7, ValueType::Enum),
            many("supportedFanModes", 13, ValueType::Enum),
            many("supportedSwingModes", 14, ValueType::Enum),
            many("supportedCustomFanModes", 15, ValueType::String),
            many("supportedPresets", 16, ValueType::Enum),
            many("supportedCustomPresets", 17, ValueType::String),
        ],
    ),
};

/// Cover
pub const COVER: EntitySchema = EntitySchema {
    kind: "cover",
    command: Some(command(
        COVER_COMMAND_REQUEST,
        9,
        &[flag("stop", 8)],
        &[
            has("position", 4, 5, ValueType::Float),
            has("tilt", 6, 7, ValueType::Float),
        ],
        &[],
    )),
    state: state(
        COVER_STATE_RESPONSE,
        6,
        &[
            real("position", 3),
            real("tilt", 4),
            code("currentOperation", 5),
        ],
    ),
    list_entities: listing(
        LIST_ENTITIES_COVER_RESPONSE,
        13,
        &[
            flag("assumedState", 5),
            flag("supportsPosition", 6),
            flag("supportsTilt", 7),
            text("deviceClass", 8),
            flag("disabledByDefault", 9),
            text("icon", 10),
            code("entityCategory", 11),
            flag("supportsStop", 12),
        ],
        &[],
    ),
};

/// Date
pub const DATE: EntitySchema = EntitySchema {
    kind: "date",
    command: Some(command(
        DATE_COMMAND_REQUEST,
        5,
        &[uint("year", 2), uint("month", 3), uint("day", 4)],
        &[],
        &[],
    )),
    state: state(
        DATE_STATE_RESPONSE,
        6,
        &[
            flag("missingState", 2),
            uint("year", 3),
            uint("month", 4),
            uint("day", 5),
        ],
    ),
    list_entities: listing(
        LIST_ENTITIES_DATE_RESPONSE,
        8,
        &[
            text("icon", 5),
            flag("disabledByDefault", 6),
            code("entityCategory", 7),
        ],
        &[],
    ),
};

/// Date and time, carried as epoch seconds
pub const DATETIME: EntitySchema = EntitySchema {
    kind: "datetime",
    command: Some(command(
        DATETIME_COMMAND_REQUEST,
        3,
        &[stamp("epochSeconds", 2)],
        &[],
        &[],
    )),
    state: state(
        DATETIME_STATE_RESPONSE,
        4,
        &[flag("missingState", 2), stamp("epochSeconds", 3)],
    ),
    list_entities: listing(
        LIST_ENTITIES_DATETIME_RESPONSE,
        8,
        &[
            text("icon", 5),
            flag("disabledByDefault", 6),
            code("entityCategory", 7),
        ],
        &[],
    ),
};

/// Event (read-only)
pub const EVENT: EntitySchema = EntitySchema {
    kind: "event",
    command: None,
    state: state(EVENT_RESPONSE, 3, &[text("eventType", 2)]),
    list_entities: listing(
        LIST_ENTITIES_EVENT_RESPONSE,
        10,
        &[
            text("icon", 5),
            flag("disabledByDefault", 6),
            code("entityCategory", 7),
            text("deviceClass", 8),
        ],
        &[many("eventTypes", 9, ValueType::String)],
    ),
};

/// Fan
pub const FAN: EntitySchema = EntitySchema {
    kind: "fan",
    command: Some(command(
        FAN_COMMAND_REQUEST,
        14,
        &[],
        &[
            has("state", 2, 3, ValueType::Bool),
            has("oscillating", 6, 7, ValueType::Bool),
            has("direction", 8, 9, ValueType::Enum),
            has("speedLevel", 10, 11, ValueType::Varint),
            has("presetMode", 12, 13, ValueType::String),
        ],
        &[EnumMapping {
            field: "direction",
            tokens: &[("forward", 0), ("reverse", 1)],
        }],
    )),
    state: state(
        FAN_STATE_RESPONSE,
        8,
        &[
            flag("state", 2),
            flag("oscillating", 3),
            code("direction", 5),
            uint("speedLevel", 6),
            text("presetMode", 7),
        ],
    ),
    list_entities: listing(
        LIST_ENTITIES_FAN_RESPONSE,
        13,
        &[
            flag("supportsOscillation", 5),
            flag("supportsSpeed", 6),
            flag("supportsDirection", 7),
            uint("supportedSpeedCount", 8),
            flag("disabledByDefault", 9),
            text("icon", 10),
            code("entityCategory", 11),
        ],
        &[many("supportedPresetModes", 12, ValueType::String)],
    ),
};

/// Light
///
/// RGB is the one attribute that does not follow the has-pattern: a single
/// `hasRgb` flag (6) covers three value fields, so all four are ordinary
/// fields and the caller sets them together.
pub const LIGHT: EntitySchema = EntitySchema {
    kind: "light",
    command: Some(command(
        LIGHT_COMMAND_REQUEST,
        28,
        &[
            flag("hasRgb", 6),
            real("red", 7),
            real("green", 8),
            real("blue", 9),
        ],
        &[
            has("state", 2, 3, ValueType::Bool),
            has("brightness", 4, 5, ValueType::Float),
            has("white", 10, 11, ValueType::Float),
            has("colorTemperature", 12, 13, ValueType::Float),
            has("transitionLength", 14, 15, ValueType::Varint),
            has("flashLength", 16, 17, ValueType::Varint),
            has("effect", 18, 19, ValueType::String),
            has("colorBrightness", 20, 21, ValueType::Float),
            has("colorMode", 22, 23, ValueType::Enum),
            has("coldWhite", 24, 25, ValueType::Float),
            has("warmWhite", 26, 27, ValueType::Float),
        ],
        &[],
    )),
    state: state(
        LIGHT_STATE_RESPONSE,
        14,
        &[
            flag("state", 2),
            real("brightness", 3),
            real("red", 4),
            real("green", 5),
            real("blue", 6),
            real("white", 7),
            real("colorTemperature", 8),
            text("effect", 9),
            real("colorBrightness", 10),
            code("colorMode", 11),
            real("coldWhite", 12),
            real("warmWhite", 13),
        ],
    ),
    list_entities: listing(
        LIST_ENTITIES_LIGHT_RESPONSE,
        16,
        &[
            real("minMireds", 9),
            real("maxMireds", 10),
            flag("disabledByDefault", 13),
            text("icon", 14),
            code("entityCategory", 15),
        ],
        &[
            many("effects", 11, ValueType::String),
            many("supportedColorModes", 12, ValueType::Enum),
        ],
    ),
};

/// Lock
pub const LOCK: EntitySchema = EntitySchema {
    kind: "lock",
    command: Some(command(
        LOCK_COMMAND_REQUEST,
        5,
        &[code("command", 2)],
        &[has("code", 3, 4, ValueType::String)],
        &[EnumMapping {
            field: "command",
            tokens: &[("unlock", 0), ("lock", 1), ("open", 2)],
        }],
    )),
    state: state(LOCK_STATE_RESPONSE, 3, &[code("state", 2)]),
    list_entities: listing(
        LIST_ENTITIES_LOCK_RESPONSE,
        12,
        &[
            text("icon", 5),
            flag("disabledByDefault", 6),
            code("entityCategory", 7),
            flag("assumedState", 8),
            flag("supportsOpen", 9),
            flag("requiresCode", 10),
            text("codeFormat", 11),
        ],
        &[],
    ),
};

/// Media player
pub const MEDIA_PLAYER: EntitySchema = EntitySchema {
    kind: "media_player",
    command: Some(command(
        MEDIA_PLAYER_COMMAND_REQUEST,
        10,
        &[],
        &[
            has("command", 2, 3, ValueType::Enum),
            has("volume", 4, 5, ValueType::Float),
            has("mediaUrl", 6, 7, ValueType::String),
            has("announcement", 8, 9, ValueType::Bool),
        ],
        &[],
    )),
    state: state(
        MEDIA_PLAYER_STATE_RESPONSE,
        5,
        &[code("state", 2), real("volume", 3), flag("muted", 4)],
    ),
    list_entities: listing(
        LIST_ENTITIES_MEDIA_PLAYER_RESPONSE,
        10,
        &[
            text("icon", 5),
            flag("disabledByDefault", 6),
            code("entityCategory", 7),
            flag("supportsPause", 8),
            uint("featureFlags", 11),
        ],
        &[],
    ),
};

/// Number
pub const NUMBER: EntitySchema = EntitySchema {
    kind: "number",
    command: Some(command(NUMBER_COMMAND_REQUEST, 3, &[real("state", 2)], &[], &[])),
    state: state(
        NUMBER_STATE_RESPONSE,
        4,
        &[real("state", 2), flag("missingState", 3)],
    ),
    list_entities: listing(
        LIST_ENTITIES_NUMBER_RESPONSE,
        14,
        &[
            text("icon", 5),
            real("minValue", 6),
            real("maxValue", 7),
            real("step", 8),
            flag("disabledByDefault", 9),
            code("entityCategory", 10),
            text("unitOfMeasurement", 11),
            code("mode", 12),
            text("deviceClass", 13),
        ],
        &[],
    ),
};

/// Select
pub const SELECT: EntitySchema = EntitySchema {
    kind: "select",
    command: Some(command(SELECT_COMMAND_REQUEST, 3, &[text("state", 2)], &[], &[])),
    state: state(
        SELECT_STATE_RESPONSE,
        4,
        &[text("state", 2), flag("missingState", 3)],
    ),
    list_entities: listing(
        LIST_ENTITIES_SELECT_RESPONSE,
        9,
        &[
            text("icon", 5),
            flag("disabledByDefault", 7),
            code("entityCategory", 8),
        ],
        &[many("options", 6, ValueType::String)],
    ),
};

/// Sensor (read-only)
pub const SENSOR: EntitySchema = EntitySchema {
    kind: "sensor",
    command: None,
    state: state(
        SENSOR_STATE_RESPONSE,
        4,
        &[real("state", 2), flag("missingState", 3)],
    ),
    list_entities: listing(
        LIST_ENTITIES_SENSOR_RESPONSE,
        14,
        &[
            text("icon", 5),
            text("unitOfMeasurement", 6),
            uint("accuracyDecimals", 7),
            flag("forceUpdate", 8),
            text("deviceClass", 9),
            code("stateClass", 10),
            flag("disabledByDefault", 12),
            code("entityCategory", 13),
        ],
        &[],
    ),
};

/// Siren
pub const SIREN: EntitySchema = EntitySchema {
    kind: "siren",
    command: Some(command(
        SIREN_COMMAND_REQUEST,
        10,
        &[],
        &[
            has("state", 2, 3, ValueType::Bool),
            has("tone", 4, 5, ValueType::String),
            has("duration", 6, 7, ValueType::Varint),
            has("volume", 8, 9, ValueType::Float),
        ],
        &[],
    )),
    state: state(SIREN_STATE_RESPONSE, 3, &[flag("state", 2)]),
    list_entities: listing(
        LIST_ENTITIES_SIREN_RESPONSE,
        11,
        &[
            text("icon", 5),
            flag("disabledByDefault", 6),
            flag("supportsDuration", 8),
            flag("supportsVolume", 9),
            code("entityCategory", 10),
        ],
        &[many("tones", 7, ValueType::String)],
    ),
};

/// Switch
pub const SWITCH: EntitySchema = EntitySchema {
    kind: "switch",
    command: Some(command(SWITCH_COMMAND_REQUEST, 3, &[flag("state", 2)], &[], &[])),
    state: state(SWITCH_STATE_RESPONSE, 3, &[flag("state", 2)]),
    list_entities: listing(
        LIST_ENTITIES_SWITCH_RESPONSE,
        10,
        &[
            text("icon", 5),
            flag("assumedState", 6),
            flag("disabledByDefault", 7),
            code("entityCategory", 8),
            text("deviceClass", 9),
        ],
        &[],
    ),
};

/// Text input
pub const TEXT: EntitySchema = EntitySchema {
    kind: "text",
    command: Some(command(TEXT_COMMAND_REQUEST, 3, &[text("state", 2)], &[], &[])),
    state: state(
        TEXT_STATE_RESPONSE,
        4,
        &[text("state", 2), flag("missingState", 3)],
    ),
    list_entities: listing(
        LIST_ENTITIES_TEXT_RESPONSE,
        12,
        &[
            text("icon", 5),
            flag("disabledByDefault", 6),
            code("entityCategory", 7),
            uint("minLength", 8),
            uint("maxLength", 9),
            text("pattern", 10),
            code("mode", 11),
        ],
        &[],
    ),
};

/// Text sensor (read-only)
pub const TEXT_SENSOR: EntitySchema = EntitySchema {
    kind: "text_sensor",
    command: None,
    state: state(
        TEXT_SENSOR_STATE_RESPONSE,
        4,
        &[text("state", 2), flag("missingState", 3)],
    ),
    list_entities: listing(
        LIST_ENTITIES_TEXT_SENSOR_RESPONSE,
        9,
        &[
            text("icon", 5),
            flag("disabledByDefault", 6),
            code("entityCategory", 7),
            text("deviceClass", 8),
        ],
        &[],
    ),
};

/// Time of day
pub const TIME: EntitySchema = EntitySchema {
    kind: "time",
    command: Some(command(
        TIME_COMMAND_REQUEST,
        5,
        &[uint("hour", 2), uint("minute", 3), uint("second", 4)],
        &[],
        &[],
    )),
    state: state(
        TIME_STATE_RESPONSE,
        6,
        &[
            flag("missingState", 2),
            uint("hour", 3),
            uint("minute", 4),
            uint("second", 5),
        ],
    ),
    list_entities: listing(
        LIST_ENTITIES_TIME_RESPONSE,
        8,
        &[
            text("icon", 5),
            flag("disabledByDefault", 6),
            code("entityCategory", 7),
        ],
        &[],
    ),
};

/// Firmware update
pub const UPDATE: EntitySchema = EntitySchema {
    kind: "update",
    command: Some(command(
        UPDATE_COMMAND_REQUEST,
        3,
        &[code("command", 2)],
        &[],
        &[EnumMapping {
            field: "command",
            tokens: &[("none", 0), ("update", 1), ("check", 2)],
        }],
    )),
    state: state(
        UPDATE_STATE_RESPONSE,
        11,
        &[
            flag("missingState", 2),
            flag("inProgress", 3),
            flag("hasProgress", 4),
            real("progress", 5),
            text("currentVersion", 6),
            text("latestVersion", 7),
            text("title", 8),
            text("releaseSummary", 9),
            text("releaseUrl", 10),
        ],
    ),
    list_entities: listing(
        LIST_ENTITIES_UPDATE_RESPONSE,
        9,
        &[
            text("icon", 5),
            flag("disabledByDefault", 6),
            code("entityCategory", 7),
            text("deviceClass", 8),
        ],
        &[],
    ),
};

/// Valve
pub const VALVE: EntitySchema = EntitySchema {
    kind: "valve",
    command: Some(command(
        VALVE_COMMAND_REQUEST,
        5,
        &[flag("stop", 4)],
        &[has("position", 2, 3, ValueType::Float)],
        &[],
    )),
    state: state(
        VALVE_STATE_RESPONSE,
        4,
        &[real("position", 2), code("currentOperation", 3)],
    ),
    list_entities: listing(
        LIST_ENTITIES_VALVE_RESPONSE,
        12,
        &[
            text("icon", 5),
            flag("disabledByDefault", 6),
            code("entityCategory", 7),
            text("deviceClass", 8),
            flag("assumedState", 9),
            flag("supportsPosition", 10),
            flag("supportsStop", 11),
        ],
        &[],
    ),
};

/// Every built-in entity kind, in alphabetical order
pub const ENTITY_SCHEMAS: &[EntitySchema] = &[
    ALARM_CONTROL_PANEL,
    BINARY_SENSOR,
    BUTTON,
    CAMERA,
    CLIMATE,
    COVER,
    DATE,
    DATETIME,
    EVENT,
    FAN,
    LIGHT,
    LOCK,
    MEDIA_PLAYER,
    NUMBER,
    SELECT,
    SENSOR,
    SIREN,
    SWITCH,
    TEXT,
    TEXT_SENSOR,
    TIME,
    UPDATE,
    VALVE,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::MessageShape;

    #[test]
    fn test_builtin_table_validates() {
        for schema in ENTITY_SCHEMAS {
            assert_eq!(schema.validate(), Ok(()), "{}", schema.kind);
        }
    }

    #[test]
    fn test_every_field_list_is_sorted() {
        for schema in ENTITY_SCHEMAS {
            for shape in [MessageShape::State, MessageShape::ListEntities, MessageShape::Command] {
                if let Some(layout) = schema.layout(shape) {
                    assert!(
                        layout.fields.windows(2).all(|w| w[0].field_number < w[1].field_number),
                        "{} {:?}",
                        schema.kind,
                        shape
                    );
                    assert!(
                        layout
                            .has_pattern_fields
                            .windows(2)
                            .all(|w| w[0].has_field_number < w[1].has_field_number),
                        "{} {:?}",
                        schema.kind,
                        shape
                    );
                }
            }
        }
    }

    #[test]
    fn test_command_shapes() {
        let commandable = ENTITY_SCHEMAS.iter().filter(|s| s.command.is_some()).count();
        assert_eq!(commandable, 18);
        assert_eq!(CLIMATE.command.unwrap().has_pattern_fields.len(), 10);
        assert_eq!(LIGHT.command.unwrap().device_id_field_number, 28);
    }
}
