//! Golden source fixtures for validation and code action tests.
//!
//! Every fixture shares the same preamble: a listener with manual
//! acknowledgements enabled, declared before a service that starts at line 13.
//! The `RESULT_*` fixtures are the exact file contents expected after applying
//! the corresponding code action.

macro_rules! preamble {
    () => {
        r#"// Service template fixture.
// The listener is configured for manual acknowledgements, so handlers
// generated with a caller must complete each message.
//

import ballerina/mqtt;
import ballerina/uuid;

listener mqtt:Listener mqttSubscriber = new (mqtt:DEFAULT_URL, uuid:createType1AsString(), "mqtt/test", {
    manualAcks: true
});

// Consumes messages published to mqtt/test.
"#
    };
}

/// Line of the `service` keyword in every fixture.
pub const SERVICE_LINE: u32 = 13;

/// Empty service body.
///
/// Flagged with `EMPTY_SERVICE` at `(13, 0)-(13, 28)`.
pub const SNIPPET_GEN_SERVICE_1: &str = concat!(preamble!(), "service on mqttSubscriber {}\n");

/// Service with fields but no remote functions.
///
/// Flagged with `MISSING_REQUIRED_METHOD` at `(13, 0)-(15, 26)`.
pub const SNIPPET_GEN_SERVICE_2: &str = concat!(
    preamble!(),
    r#"service on mqttSubscriber {
    private final string topic = "mqtt/test";
    int receivedCount = 0;
}
"#
);

/// `SNIPPET_GEN_SERVICE_1` after inserting the template with caller.
pub const RESULT_SERVICE_1: &str = concat!(
    preamble!(),
    r#"service on mqttSubscriber {
    remote function onMessage(mqtt:Message message, mqtt:Caller caller) returns error? {
        check caller->complete();
    }
}
"#
);

/// `SNIPPET_GEN_SERVICE_2` after inserting the template with caller.
pub const RESULT_SERVICE_2: &str = concat!(
    preamble!(),
    r#"service on mqttSubscriber {
    private final string topic = "mqtt/test";
    int receivedCount = 0;

    remote function onMessage(mqtt:Message message, mqtt:Caller caller) returns error? {
        check caller->complete();
    }
}
"#
);

/// `SNIPPET_GEN_SERVICE_1` after inserting the template without caller.
pub const RESULT_SERVICE_3: &str = concat!(
    preamble!(),
    r#"service on mqttSubscriber {
    remote function onMessage(mqtt:Message message) returns error? {
    }
}
"#
);

/// `SNIPPET_GEN_SERVICE_2` after inserting the template without caller.
pub const RESULT_SERVICE_4: &str = concat!(
    preamble!(),
    r#"service on mqttSubscriber {
    private final string topic = "mqtt/test";
    int receivedCount = 0;

    remote function onMessage(mqtt:Message message) returns error? {
    }
}
"#
);

/// A service that satisfies the listener contract.
pub const VALID_SERVICE: &str = concat!(
    preamble!(),
    r#"service on mqttSubscriber {
    remote function onMessage(mqtt:Message message, mqtt:Caller caller) returns error? {
        check caller->complete();
    }

    remote function onError(mqtt:Error err) {
    }
}
"#
);
