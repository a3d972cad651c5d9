use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
};

use crate::{error::FailureReason, event::Event, subscriber::Subscriber};

/// Invoke one subscriber, containing both returned errors and panics.
pub(super) fn deliver(subscriber: &dyn Subscriber, event: &Event) -> Result<(), FailureReason> {
    match panic::catch_unwind(AssertUnwindSafe(|| subscriber.receive(event))) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => Err(FailureReason::Error(err)),
        Err(payload) => Err(FailureReason::Panicked(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::ReceiveError,
        subscriber::{Identify, Key},
    };

    struct Scripted {
        key: Key,
        outcome: fn() -> Result<(), ReceiveError>,
    }

    impl Identify for Scripted {
        fn identity(&self) -> &Key {
            &self.key
        }
    }

    impl Subscriber for Scripted {
        fn receive(&self, _event: &Event) -> Result<(), ReceiveError> {
            (self.outcome)()
        }
    }

    fn scripted(outcome: fn() -> Result<(), ReceiveError>) -> Scripted {
        Scripted {
            key: Key::from("scripted"),
            outcome,
        }
    }

    #[test]
    fn ok_passes_through() {
        let subscriber = scripted(|| Ok(()));

        assert_eq!(deliver(&subscriber, &Event::new("a", "b")), Ok(()));
    }

    #[test]
    fn error_is_reported() {
        let subscriber = scripted(|| Err(ReceiveError::rejected("nope")));

        assert_eq!(
            deliver(&subscriber, &Event::new("a", "b")),
            Err(FailureReason::Error(ReceiveError::rejected("nope")))
        );
    }

    #[test]
    fn panic_is_caught_with_message() {
        let subscriber = scripted(|| panic!("exploded"));

        assert_eq!(
            deliver(&subscriber, &Event::new("a", "b")),
            Err(FailureReason::Panicked("exploded".into()))
        );
    }

    #[test]
    fn formatted_panic_is_caught_with_message() {
        let subscriber = scripted(|| panic!("exploded {}", 42));

        assert_eq!(
            deliver(&subscriber, &Event::new("a", "b")),
            Err(FailureReason::Panicked("exploded 42".into()))
        );
    }
}
