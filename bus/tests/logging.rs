//! Log output of the bus, captured through `ChannelLogger`.
//!
//! The global logger can only be installed once per process, so this file holds a single
//! test.

use std::rc::Rc;

use log::{Level, LevelFilter};
use rusty_bus::{
    BusConfig, Event, EventBus, FailurePolicy, Identify, Key, ReceiveError, Subscriber,
    logging::{ChannelLogger, LogMessage},
    subscribers::{Journal, Milestone},
};

#[derive(Identify)]
struct Grumpy {
    #[identity]
    key: Key,
}

impl Subscriber for Grumpy {
    fn receive(&self, _event: &Event) -> Result<(), ReceiveError> {
        Err(ReceiveError::rejected("not today"))
    }
}

fn drain(receiver: &crossbeam::channel::Receiver<LogMessage>) -> Vec<LogMessage> {
    receiver.try_iter().collect()
}

#[test]
fn bus_reports_through_log_facade() {
    let receiver = ChannelLogger::install(LevelFilter::Info).unwrap();
    let bus = EventBus::with_config(
        BusConfig::default().with_failure_policy(FailurePolicy::LogAndContinue),
    );

    // Duplicate registration is informational
    let qt = Rc::new(
        Milestone::new(Key::from("qt"), "enemy_defeated", 5).with_message("task finished!"),
    );
    bus.subscribe(&qt);
    drain(&receiver);
    bus.subscribe(&qt);
    let messages = drain(&receiver);
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].level, Level::Info);
    assert_eq!(messages[0].message, "subscriber `qt` already registered");

    // Milestone fires on the fifth event only
    for _ in 0..4 {
        bus.publish(&Event::new("enemy_defeated", "1")).unwrap();
    }
    assert!(drain(&receiver).is_empty());
    bus.publish(&Event::new("enemy_defeated", "1")).unwrap();
    let messages = drain(&receiver);
    assert_eq!(messages.len(), 1);
    assert!(messages[0].message.contains("task finished!"));

    // Journal logs every event
    let ui = Rc::new(Journal::new(Key::from("ui")));
    bus.subscribe(&ui);
    drain(&receiver);
    bus.publish(&Event::new("random event", "3")).unwrap();
    let messages = drain(&receiver);
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].message, "[ui] type:random event,payload:3");

    // Failures are logged as warnings and do not surface
    let grumpy = Rc::new(Grumpy {
        key: Key::from("grumpy"),
    });
    bus.subscribe(&grumpy);
    drain(&receiver);
    let delivery = bus.publish(&Event::new("random event", "4")).unwrap();
    assert_eq!(delivery.failed, 1);
    let warnings: Vec<_> = drain(&receiver)
        .into_iter()
        .filter(|message| message.level == Level::Warn)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(
        warnings[0].message,
        "subscriber `grumpy` rejected: not today on `random event`"
    );
}
