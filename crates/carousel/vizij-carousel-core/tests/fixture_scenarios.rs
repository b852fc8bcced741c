use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use vizij_carousel_core::{
    AutoPlayState, Carousel, Config, GestureSample, Key, SlotBuffer, VecItems,
};

#[derive(Debug, Deserialize)]
struct Scenario {
    items: Vec<String>,
    #[serde(default)]
    viewport: Option<[f32; 2]>,
    steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "do", rename_all = "snake_case")]
enum Step {
    Next,
    Previous,
    GoTo {
        index: usize,
        #[serde(default = "default_true")]
        animate: bool,
    },
    Key {
        key: Key,
    },
    Update {
        dt: f32,
    },
    GestureStart,
    GestureSample {
        cumulative: f32,
        #[serde(default)]
        velocity: f32,
    },
    GestureEnd,
    PointerEnter,
    PointerExit,
    Remove {
        index: usize,
    },
    Push {
        item: String,
    },
    Clear,
    Expect(Expectation),
}

#[derive(Debug, Default, Deserialize)]
struct Expectation {
    selected: Option<i32>,
    transitioning: Option<bool>,
    manipulating: Option<bool>,
    autoplay: Option<AutoPlayState>,
    visible: Option<Vec<usize>>,
    /// SelectionChanged notifications seen so far.
    changed: Option<usize>,
}

fn default_true() -> bool {
    true
}

type Harness = Carousel<VecItems<String>, SlotBuffer>;

fn build(name: &str) -> Result<(Scenario, Harness, Rc<RefCell<usize>>)> {
    let scenario: Scenario = vizij_test_fixtures::carousel_scenarios::load(name)?;
    let cfg = match vizij_test_fixtures::carousel_scenarios::config_json(name)? {
        Some(json) => Config::from_json(&json).with_context(|| format!("config for {name}"))?,
        None => Config::default(),
    };
    let mut carousel = Carousel::try_new(VecItems::new(scenario.items.clone()), cfg)?;
    if let Some([w, h]) = scenario.viewport {
        carousel.set_viewport(w, h);
    }
    let changed = Rc::new(RefCell::new(0usize));
    let counter = changed.clone();
    carousel.on_selection_changed(move |_| *counter.borrow_mut() += 1);
    Ok((scenario, carousel, changed))
}

fn check(name: &str, at: usize, c: &Harness, changed: usize, e: &Expectation) -> Result<()> {
    let ctx = |what: &str| format!("{name} step {at}: {what}");
    if let Some(sel) = e.selected {
        if c.selected_index() != sel {
            bail!(ctx(&format!("selected {} != {sel}", c.selected_index())));
        }
    }
    if let Some(t) = e.transitioning {
        if c.is_transitioning() != t {
            bail!(ctx(&format!("transitioning {}", c.is_transitioning())));
        }
    }
    if let Some(m) = e.manipulating {
        if c.is_manipulating() != m {
            bail!(ctx(&format!("manipulating {}", c.is_manipulating())));
        }
    }
    if let Some(state) = e.autoplay {
        if c.auto_play_state() != state {
            bail!(ctx(&format!("autoplay {:?}", c.auto_play_state())));
        }
    }
    if let Some(visible) = &e.visible {
        let got = c.slots().visible_slots();
        if &got != visible {
            bail!(ctx(&format!("visible {got:?} != {visible:?}")));
        }
    }
    if let Some(n) = e.changed {
        if changed != n {
            bail!(ctx(&format!("changed count {changed} != {n}")));
        }
    }
    if let Err(msg) = c.state().check_invariants() {
        bail!(ctx(&msg));
    }
    Ok(())
}

fn run(name: &str) -> Result<()> {
    let (scenario, mut c, changed) = build(name)?;
    for (at, step) in scenario.steps.iter().enumerate() {
        match step {
            Step::Next => c.next(),
            Step::Previous => c.previous(),
            Step::GoTo { index, animate } => c.go_to(*index, *animate),
            Step::Key { key } => {
                c.handle_key(*key);
            }
            Step::Update { dt } => c.update(*dt),
            Step::GestureStart => {
                let _ = c.gesture_started();
            }
            Step::GestureSample {
                cumulative,
                velocity,
            } => {
                let axis = c.config().orientation;
                c.gesture_sample(GestureSample::along(axis, *cumulative, *velocity));
            }
            Step::GestureEnd => c.gesture_ended(),
            Step::PointerEnter => c.pointer_entered(),
            Step::PointerExit => c.pointer_exited(),
            Step::Remove { index } => {
                c.mutate_items(|items| items.remove(*index));
            }
            Step::Push { item } => c.mutate_items(|items| items.push(item.clone())),
            Step::Clear => c.mutate_items(|items| items.clear()),
            Step::Expect(e) => check(name, at, &c, *changed.borrow(), e)?,
        }
    }
    Ok(())
}

#[test]
fn manifest_lists_every_scenario() {
    let mut keys = vizij_test_fixtures::carousel_scenarios::keys();
    keys.sort();
    assert_eq!(
        keys,
        vec![
            "autoplay-hover",
            "bounded-edges",
            "items-shrink",
            "loop-wrap",
            "swipe-commit",
            "swipe-snap-back",
            "vertical-keys",
        ]
    );
}

#[test]
fn every_config_fixture_validates() {
    for key in vizij_test_fixtures::carousel_configs::keys() {
        let json = vizij_test_fixtures::carousel_configs::json(&key).expect("config json");
        Config::from_json(&json).unwrap_or_else(|e| panic!("config {key}: {e}"));
    }
}

/// it should replay every scripted scenario from fixtures/carousel/scenarios
#[test]
fn scripted_scenarios_hold() {
    for key in vizij_test_fixtures::carousel_scenarios::keys() {
        run(&key).unwrap_or_else(|e| panic!("{e:#}"));
    }
}

#[test]
fn unknown_scenario_is_an_error() {
    assert!(vizij_test_fixtures::carousel_scenarios::load::<serde_json::Value>("nope").is_err());
}
