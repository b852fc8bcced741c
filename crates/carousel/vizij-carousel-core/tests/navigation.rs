use std::cell::RefCell;
use std::rc::Rc;

use vizij_carousel_core::{
    Carousel, Config, Key, NavigationIntent, SelectionChanged, SlotBuffer, VecItems,
};

type Log = Rc<RefCell<Vec<String>>>;

fn carousel(n: usize, looping: bool) -> Carousel<VecItems<String>, SlotBuffer> {
    let items: Vec<String> = (0..n).map(|i| format!("item-{i}")).collect();
    Carousel::new(
        VecItems::new(items),
        Config {
            looping,
            ..Config::default()
        },
    )
}

/// Records changing/changed events as strings like `changing:item-0->item-1`.
fn record(c: &mut Carousel<VecItems<String>, SlotBuffer>) -> Log {
    let log: Log = Rc::default();
    let l = log.clone();
    c.on_selection_changing(move |e| {
        l.borrow_mut().push(format!(
            "changing:{}->{}",
            e.previous_item.as_deref().unwrap_or("-"),
            e.new_item.as_deref().unwrap_or("-")
        ))
    });
    let l = log.clone();
    c.on_selection_changed(move |e| {
        l.borrow_mut()
            .push(format!("changed:{}->{}", e.previous_index, e.new_index))
    });
    log
}

fn settle(c: &mut Carousel<VecItems<String>, SlotBuffer>) {
    for _ in 0..10 {
        c.update(0.1);
    }
}

#[test]
fn first_item_is_selected_on_construction() {
    let c = carousel(3, true);
    assert_eq!(c.selected_index(), 0);
    assert_eq!(c.current_item().as_deref(), Some("item-0"));
    assert_eq!(c.slots().visible_slots(), vec![0]);
    assert!(c.state().check_invariants().is_ok());
}

#[test]
fn empty_collection_has_no_selection() {
    let c = carousel(0, true);
    assert_eq!(c.selected_index(), -1);
    assert!(c.current_item().is_none());
    assert!(!c.can_go_next());
    assert!(!c.can_go_previous());
}

/// it should wrap from the last item to the first and animate forward
#[test]
fn next_wraps_forward_when_looping() {
    let mut c = carousel(3, true);
    c.go_to(2, false);
    c.next();
    assert_eq!(c.selected_index(), 0);
    // loop wrap animates forward: the incoming slot enters from the positive side
    let incoming = c.slots().get(0).copied().expect("slot 0");
    assert!(incoming.offset > 0.0, "offset {}", incoming.offset);
    settle(&mut c);
    assert_eq!(c.slots().visible_slots(), vec![0]);
}

#[test]
fn previous_wraps_to_last_when_looping() {
    let mut c = carousel(4, true);
    c.previous();
    assert_eq!(c.selected_index(), 3);
}

#[test]
fn edges_are_hard_without_looping() {
    let mut c = carousel(3, false);
    let log = record(&mut c);
    c.previous();
    assert_eq!(c.selected_index(), 0);
    c.go_to(2, false);
    c.next();
    assert_eq!(c.selected_index(), 2);
    assert_eq!(log.borrow().len(), 2, "only the go_to notified: {:?}", log.borrow());
}

/// it should raise SelectionChanging before SelectionChanged, once per commit
#[test]
fn changing_precedes_changed_once_per_commit() {
    let mut c = carousel(3, true);
    let log = record(&mut c);
    c.go_to(1, true);
    assert_eq!(
        *log.borrow(),
        vec!["changing:item-0->item-1".to_string(), "changed:0->1".to_string()]
    );
    settle(&mut c);
    assert_eq!(log.borrow().len(), 2, "completion raises nothing more");
}

/// it should leave selection and visuals untouched when an observer cancels
#[test]
fn cancelled_change_leaves_state_untouched() {
    let mut c = carousel(3, true);
    c.on_selection_changing(|e| e.cancel = true);
    let changed = Rc::new(RefCell::new(0));
    let n = changed.clone();
    c.on_selection_changed(move |_| *n.borrow_mut() += 1);
    let before = c.slots().clone();

    c.go_to(2, true);

    assert_eq!(c.selected_index(), 0);
    assert!(!c.is_transitioning());
    assert_eq!(*changed.borrow(), 0);
    assert_eq!(c.slots(), &before);
}

#[test]
fn go_to_ignores_out_of_range_and_current() {
    let mut c = carousel(3, true);
    let log = record(&mut c);
    c.go_to(3, true);
    c.go_to(0, true);
    assert!(log.borrow().is_empty());
    assert!(!c.is_transitioning());
}

#[test]
fn next_during_transition_is_ignored() {
    let mut c = carousel(5, true);
    c.next();
    assert!(c.is_transitioning());
    c.next();
    assert_eq!(c.selected_index(), 1);
}

/// it should settle the running transition before starting the next one
#[test]
fn go_to_during_transition_supersedes_it() {
    let mut c = carousel(5, true);
    c.next();
    c.go_to(3, true);
    assert_eq!(c.selected_index(), 3);
    settle(&mut c);
    assert!(!c.is_transitioning());
    assert_eq!(c.slots().visible_slots(), vec![3]);
}

#[test]
fn unanimated_go_to_settles_immediately() {
    let mut c = carousel(4, true);
    c.go_to(2, false);
    assert!(!c.is_transitioning());
    let s = c.slots().get(2).copied().expect("slot");
    assert_eq!(s.opacity, 1.0);
    assert_eq!(s.offset, 0.0);
    assert_eq!(c.slots().visible_slots(), vec![2]);
}

#[test]
fn keys_follow_orientation() {
    let mut c = carousel(4, false);
    assert!(c.handle_key(Key::Right));
    assert_eq!(c.selected_index(), 1);
    settle(&mut c);
    assert!(!c.handle_key(Key::Down));
    assert!(c.handle_key(Key::End));
    assert_eq!(c.selected_index(), 3);
    settle(&mut c);
    assert!(c.handle_key(Key::Home));
    assert_eq!(c.selected_index(), 0);
}

#[test]
fn navigate_intents() {
    let mut c = carousel(5, true);
    c.navigate(NavigationIntent::Index(4));
    assert_eq!(c.selected_index(), 4);
    settle(&mut c);
    c.navigate(NavigationIntent::Next);
    assert_eq!(c.selected_index(), 0);
    settle(&mut c);
    c.navigate(NavigationIntent::Last);
    assert_eq!(c.selected_index(), 4);
}

#[test]
fn button_enablement() {
    let mut c = carousel(3, false);
    assert!(!c.can_go_previous());
    assert!(c.can_go_next());
    c.go_to(2, false);
    assert!(c.can_go_previous());
    assert!(!c.can_go_next());
    c.set_looping(true);
    assert!(c.can_go_next());

    let single = carousel(1, true);
    assert!(!single.can_go_next());
    assert!(!single.can_go_previous());
}

/// it should route a bound index write through go_to exactly once
#[test]
fn bound_index_write_navigates_once() {
    let mut c = carousel(4, true);
    let seen: Rc<RefCell<Vec<SelectionChanged<String>>>> = Rc::default();
    let s = seen.clone();
    c.on_selection_changed(move |e| s.borrow_mut().push(e.clone()));

    c.set_selected_index(2);
    // the host mirrors the new value back; that echo is not a navigation
    c.set_selected_index(2);
    c.set_selected_index(-1);

    assert_eq!(seen.borrow().len(), 1);
    assert_eq!(seen.borrow()[0].new_index, 2);
    assert_eq!(seen.borrow()[0].new_item.as_deref(), Some("item-2"));
}

#[test]
fn bound_item_write_navigates_to_its_index() {
    let mut c = carousel(4, true);
    c.set_selected_item(&"item-3".to_string());
    assert_eq!(c.selected_index(), 3);
    c.set_selected_item(&"missing".to_string());
    assert_eq!(c.selected_index(), 3);
}

#[test]
fn invariants_hold_through_a_session() {
    let mut c = carousel(5, false);
    let steps: [fn(&mut Carousel<VecItems<String>, SlotBuffer>); 5] = [
        |c| c.next(),
        |c| c.update(0.1),
        |c| c.go_to(4, true),
        |c| c.previous(),
        |c| c.update(0.5),
    ];
    for step in steps.iter().cycle().take(25) {
        step(&mut c);
        c.state().check_invariants().expect("invariants");
    }
}
