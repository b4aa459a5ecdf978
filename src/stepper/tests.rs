//! Tests for the stepper controller

use super::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

fn recorder(controller: &StepperController) -> Rc<RefCell<Vec<i64>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    controller.on(StepperEvent::Next, move |v| sink.borrow_mut().push(v));
    seen
}

#[test]
fn test_initial_step_defaults_to_zero() {
    let controller = StepperController::new(0);
    assert_eq!(controller.active_step(), 0);
    assert_eq!(controller.items_count(), 0);
}

#[test]
fn test_initial_step_is_seeded() {
    let controller = StepperController::new(2);
    assert_eq!(controller.active_step(), 2);
}

#[test]
fn test_move_next_increments_and_notifies() {
    let controller = StepperController::new(0);
    controller.set_items_count(3);
    let seen = recorder(&controller);

    controller.move_next();

    assert_eq!(controller.active_step(), 1);
    assert_eq!(*seen.borrow(), vec![1]);
}

#[test]
fn test_move_next_without_listeners_is_silent() {
    let controller = StepperController::new(0);
    controller.move_next();
    assert_eq!(controller.active_step(), 1);
}

#[test]
fn test_every_listener_called_once_per_move_next() {
    let controller = StepperController::new(4);
    let a = recorder(&controller);
    let b = recorder(&controller);

    controller.move_next();

    assert_eq!(*a.borrow(), vec![5]);
    assert_eq!(*b.borrow(), vec![5]);
}

#[test]
fn test_listener_sees_target_before_commit() {
    let controller = StepperController::new(0);
    let observed = Rc::new(RefCell::new(None));
    let inner = controller.clone();
    let sink = Rc::clone(&observed);
    controller.on("next", move |target| {
        *sink.borrow_mut() = Some((target, inner.active_step()));
    });

    controller.move_next();

    assert_eq!(*observed.borrow(), Some((1, 0)));
    assert_eq!(controller.active_step(), 1);
}

#[test]
fn test_move_prev_has_no_lower_bound() {
    let controller = StepperController::new(0);
    controller.set_items_count(3);
    controller.move_prev();
    assert_eq!(controller.active_step(), -1);
}

#[test]
fn test_move_prev_does_not_emit_next() {
    let controller = StepperController::new(2);
    let seen = recorder(&controller);
    controller.move_prev();
    assert_eq!(controller.active_step(), 1);
    assert!(seen.borrow().is_empty());
}

#[test]
fn test_move_to_accepts_any_index() {
    let controller = StepperController::new(0);
    controller.set_items_count(3);
    let seen = recorder(&controller);

    for index in [2, 10, -5, 0] {
        controller.move_to(index);
        assert_eq!(controller.active_step(), index);
    }
    assert!(seen.borrow().is_empty());
}

#[test]
fn test_set_items_count_keeps_latest_value() {
    let controller = StepperController::new(2);
    controller.set_items_count(3);
    assert!(controller.snapshot().is_last());

    controller.set_items_count(5);
    let snap = controller.snapshot();
    assert_eq!(snap.items_count, 5);
    assert!(!snap.is_last());
    assert!(snap.has_next());
}

#[test]
fn test_events_for_other_names_are_never_fired() {
    let controller = StepperController::new(0);
    let fired = Rc::new(Cell::new(false));
    let flag = Rc::clone(&fired);
    controller.on("prev", move |_| flag.set(true));

    controller.move_prev();
    controller.move_next();
    controller.move_to(3);

    assert!(!fired.get());
}

#[test]
fn test_off_stops_delivery() {
    let controller = StepperController::new(0);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let id = controller.on("next", move |v| sink.borrow_mut().push(v));

    controller.move_next();
    assert!(controller.off(id));
    controller.move_next();

    assert_eq!(*seen.borrow(), vec![1]);
    assert_eq!(controller.listener_count("next"), 0);
    assert!(!controller.off(id));
}

#[test]
fn test_reentrant_move_next_is_queued_after_commit() {
    let controller = StepperController::new(0);
    let seen = recorder(&controller);
    let inner = controller.clone();
    let once = Cell::new(false);
    controller.on("next", move |_| {
        if !once.replace(true) {
            inner.move_next();
        }
    });

    controller.move_next();

    assert_eq!(controller.active_step(), 2);
    assert_eq!(*seen.borrow(), vec![1, 2]);
}

#[test]
fn test_reentrant_chain_is_bounded() {
    let controller = StepperController::with_chain_limit(0, 3);
    let seen = recorder(&controller);
    let inner = controller.clone();
    controller.on("next", move |_| inner.move_next());

    controller.move_next();

    // one outer transition plus three chained ones
    assert_eq!(controller.active_step(), 4);
    assert_eq!(*seen.borrow(), vec![1, 2, 3, 4]);

    // the controller accepts new requests once the chain is dropped
    let outer = controller.clone();
    outer.move_to(0);
    assert_eq!(controller.active_step(), 0);
}

#[test]
fn test_reentrant_requests_apply_in_order() {
    let controller = StepperController::new(0);
    let inner = controller.clone();
    let once = Cell::new(false);
    controller.on("next", move |_| {
        if !once.replace(true) {
            inner.move_to(10);
            inner.move_prev();
        }
    });

    controller.move_next();

    assert_eq!(controller.active_step(), 9);
}

#[test]
fn test_listener_may_subscribe_during_broadcast() {
    let controller = StepperController::new(0);
    let inner = controller.clone();
    let late = Rc::new(RefCell::new(Vec::new()));
    let late_sink = Rc::clone(&late);
    let once = Cell::new(false);
    controller.on("next", move |_| {
        if !once.replace(true) {
            let sink = Rc::clone(&late_sink);
            inner.on("next", move |v| sink.borrow_mut().push(v));
        }
    });

    controller.move_next();
    assert!(late.borrow().is_empty());

    controller.move_next();
    assert_eq!(*late.borrow(), vec![2]);
}

#[test]
fn test_api_delegates_to_live_state() {
    let controller = StepperController::new(0);
    controller.set_items_count(3);
    let api = controller.api();

    controller.move_to(2);
    assert_eq!(api.snapshot().active_step, 2);

    api.move_prev();
    assert_eq!(controller.active_step(), 1);

    api.move_next();
    api.move_to(0);
    assert_eq!(controller.active_step(), 0);
}

#[test]
fn test_api_subscription_is_shared_with_controller() {
    let controller = StepperController::new(0);
    let api = controller.api();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let id = api.on("next", move |v| sink.borrow_mut().push(v));

    controller.move_next();
    assert_eq!(*seen.borrow(), vec![1]);
    assert_eq!(controller.listener_count(StepperEvent::Next), 1);
    assert!(api.off(id));
}

#[test]
fn test_panicking_listener_does_not_wedge_controller() {
    let controller = StepperController::new(0);
    controller.on("next", |v| {
        if v == 1 {
            panic!("listener failure");
        }
    });

    let attempt = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| controller.move_next()));
    assert!(attempt.is_err());

    // broadcast happens before commit, so the step did not advance
    assert_eq!(controller.active_step(), 0);
    controller.move_to(1);
    assert_eq!(controller.active_step(), 1);
}

#[test]
fn test_transitions_queued_before_panic_are_discarded() {
    let controller = StepperController::new(0);
    let seen = recorder(&controller);
    let inner = controller.clone();
    controller.on("next", move |v| {
        if v == 1 {
            inner.move_to(7);
            panic!("listener failure");
        }
    });

    let attempt = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| controller.move_next()));
    assert!(attempt.is_err());

    // the queued move_to(7) must not replay on the next call
    controller.move_prev();
    assert_eq!(controller.active_step(), -1);
    assert_eq!(*seen.borrow(), vec![1]);
}

#[test]
fn test_move_next_saturates_at_max() {
    let controller = StepperController::new(0);
    let seen = recorder(&controller);

    controller.move_to(i64::MAX);
    controller.move_next();

    assert_eq!(controller.active_step(), i64::MAX);
    assert_eq!(*seen.borrow(), vec![i64::MAX]);
}

#[test]
fn test_move_prev_saturates_at_min() {
    let controller = StepperController::new(i64::MIN);
    controller.move_prev();
    assert_eq!(controller.active_step(), i64::MIN);

    controller.move_next();
    assert_eq!(controller.active_step(), i64::MIN + 1);
}

#[test]
fn test_parse_transitions() {
    assert_eq!("next".parse::<Transition>(), Ok(Transition::Next));
    assert_eq!("Prev".parse::<Transition>(), Ok(Transition::Prev));
    assert_eq!("to:3".parse::<Transition>(), Ok(Transition::To(3)));
    assert_eq!("to:-1".parse::<Transition>(), Ok(Transition::To(-1)));
    assert!("jump".parse::<Transition>().is_err());
    assert!("to:x".parse::<Transition>().is_err());
}

#[test]
fn test_request_matches_dedicated_methods() {
    let controller = StepperController::new(0);
    let seen = recorder(&controller);
    controller.request(Transition::Next);
    controller.request(Transition::To(5));
    controller.request(Transition::Prev);
    assert_eq!(controller.active_step(), 4);
    assert_eq!(*seen.borrow(), vec![1]);
}
