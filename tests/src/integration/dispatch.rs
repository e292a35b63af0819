//! # Dispatch Flows
//!
//! Publish/subscribe scenarios mixing handler kinds on one topic:
//!
//! 1. **Ordering**: handlers run in registration order
//! 2. **Once handlers**: removed after their first dispatch, wherever they sit
//! 3. **Faults**: bad arguments and panicking handlers surface to the publisher

#[cfg(test)]
mod tests {
    use crate::integration::init_logging;
    use event_bus::prelude::*;
    use event_bus::Value;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    type Log = Arc<Mutex<Vec<String>>>;

    /// Callback appending `name` to `log` whenever it runs.
    fn tagged(log: &Log, name: &str) -> Callback {
        let log = log.clone();
        let name = name.to_string();
        Callback::variadic(move |_: &Args| log.lock().push(name.clone()))
    }

    fn on_deposit(_account: String, _amount: u64) {}

    // =============================================================================
    // ORDERING
    // =============================================================================

    #[test]
    fn test_handlers_run_in_registration_order() {
        init_logging();
        let bus = Bus::new();
        let log: Log = Arc::default();

        for name in ["audit", "ledger", "notify"] {
            bus.subscribe("account.deposit", tagged(&log, name)).unwrap();
        }

        bus.publish("account.deposit", ("alice".to_string(), 100u64));
        assert_eq!(*log.lock(), vec!["audit", "ledger", "notify"]);
    }

    #[test]
    fn test_typed_arguments_delivered() {
        init_logging();
        let bus = Bus::new();
        let received = Arc::new(Mutex::new(Vec::new()));
        let r = received.clone();

        bus.subscribe("account.deposit", move |account: String, amount: u64| {
            r.lock().push((account, amount));
        })
        .unwrap();

        bus.publish("account.deposit", ("alice".to_string(), 100u64));
        bus.publish("account.deposit", ("bob".to_string(), 7u64));

        assert_eq!(
            *received.lock(),
            vec![("alice".to_string(), 100), ("bob".to_string(), 7)]
        );
    }

    #[test]
    fn test_variadic_handler_sees_raw_arguments() {
        init_logging();
        let bus = Bus::new();
        let lens = Arc::new(Mutex::new(Vec::new()));
        let l = lens.clone();

        bus.subscribe(
            "any",
            Callback::variadic(move |args: &Args| l.lock().push(args.len())),
        )
        .unwrap();

        bus.publish("any", ());
        bus.publish("any", (1u8, "two", 3.0f64));
        let raw: Vec<Value> = vec![Arc::new(1u8), Arc::new(2u8)];
        bus.publish("any", raw);

        assert_eq!(*lens.lock(), vec![0, 3, 2]);
    }

    // =============================================================================
    // ONCE HANDLERS
    // =============================================================================

    #[test]
    fn test_once_handlers_interleaved_with_persistent() {
        init_logging();
        let bus = Bus::new();
        let log: Log = Arc::default();

        bus.subscribe_once("t", tagged(&log, "once-a")).unwrap();
        bus.subscribe("t", tagged(&log, "keep-1")).unwrap();
        bus.subscribe_once("t", tagged(&log, "once-b")).unwrap();
        bus.subscribe_once("t", tagged(&log, "once-c")).unwrap();
        bus.subscribe("t", tagged(&log, "keep-2")).unwrap();

        bus.publish("t", ());
        bus.publish("t", ());

        assert_eq!(
            *log.lock(),
            vec!["once-a", "keep-1", "once-b", "once-c", "keep-2", "keep-1", "keep-2"]
        );
        assert_eq!(bus.handler_count("t"), 2);
    }

    #[test]
    fn test_only_once_handlers_forget_topic() {
        init_logging();
        let bus = Bus::new();
        let calls = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let c = calls.clone();
            bus.subscribe_once("t", move || {
                c.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        }

        bus.publish("t", ());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(!bus.has_callback("t"));
        assert!(bus.topics().is_empty());
        assert!(matches!(
            bus.unsubscribe("t", on_deposit),
            Err(BusError::UnknownTopic { .. })
        ));
    }

    // =============================================================================
    // UNSUBSCRIBE
    // =============================================================================

    #[test]
    fn test_unsubscribe_then_publish() {
        init_logging();
        let bus = Bus::new();
        let log: Log = Arc::default();

        // Distinct closure expressions, so each is its own code entry.
        let l = log.clone();
        let keep = Callback::variadic(move |_: &Args| l.lock().push("keep".to_string()));
        let l = log.clone();
        let drop_me = Callback::variadic(move |_: &Args| l.lock().push("drop".to_string()));

        bus.subscribe("t", keep).unwrap();
        bus.subscribe("t", drop_me.clone()).unwrap();
        bus.unsubscribe("t", drop_me).unwrap();

        bus.publish("t", ());
        assert_eq!(*log.lock(), vec!["keep"]);
    }

    #[test]
    fn test_shared_code_entry_unsubscribe_removes_first_match() {
        init_logging();
        let bus = Bus::new();
        let log: Log = Arc::default();

        // Both come from the closure inside `tagged`, so they share a code
        // entry and the earliest record matches first.
        let first = tagged(&log, "first");
        let second = tagged(&log, "second");
        assert!(first.same_handler(&second));

        bus.subscribe("t", first).unwrap();
        bus.subscribe("t", second.clone()).unwrap();
        bus.unsubscribe("t", second).unwrap();

        bus.publish("t", ());
        assert_eq!(*log.lock(), vec!["second"]);
        assert_eq!(bus.handler_count("t"), 1);
    }

    #[test]
    fn test_unsubscribe_by_fn_item() {
        init_logging();
        let bus = Bus::new();
        bus.subscribe("account.deposit", on_deposit).unwrap();
        bus.subscribe_async("account.deposit", on_deposit, true).unwrap();

        bus.unsubscribe("account.deposit", on_deposit).unwrap();
        assert_eq!(bus.handler_count("account.deposit"), 1);
        bus.unsubscribe("account.deposit", on_deposit).unwrap();
        assert!(!bus.has_callback("account.deposit"));
    }

    // =============================================================================
    // FAULTS
    // =============================================================================

    #[test]
    fn test_non_invocable_handler_rejected() {
        init_logging();
        let bus = Bus::new();
        let value: Value = Arc::new(42u32);

        let err = bus.subscribe("t", Callback::from_any(value)).unwrap_err();
        assert!(err.to_string().contains("is not invocable"));
        assert!(!bus.has_callback("t"));
    }

    #[test]
    fn test_wrong_arity_panics_in_publisher() {
        init_logging();
        let bus = Bus::new();
        bus.subscribe("account.deposit", on_deposit).unwrap();

        let b = bus.clone();
        let result = std::thread::spawn(move || b.publish("account.deposit", ("alice".to_string(),)))
            .join();
        assert!(result.is_err());

        // Bus is still usable after the fault.
        bus.publish("account.deposit", ("alice".to_string(), 1u64));
    }

    #[test]
    fn test_panic_skips_later_handlers_of_that_publish() {
        init_logging();
        let bus = Bus::new();
        let log: Log = Arc::default();

        bus.subscribe("t", tagged(&log, "first")).unwrap();
        bus.subscribe("t", || panic!("second fails")).unwrap();
        bus.subscribe("t", tagged(&log, "third")).unwrap();

        let b = bus.clone();
        assert!(std::thread::spawn(move || b.publish("t", ())).join().is_err());
        assert_eq!(*log.lock(), vec!["first"]);
        assert_eq!(bus.handler_count("t"), 3);
    }

    #[test]
    fn test_events_published_counts_every_call() {
        init_logging();
        let bus = Bus::new();
        bus.subscribe("t", || {}).unwrap();

        bus.publish("t", ());
        bus.publish("nobody", ());
        assert_eq!(bus.events_published(), 2);
    }
}
