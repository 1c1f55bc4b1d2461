//! End-to-end scene wiring: moving bodies, multiple bindings, deferred
//! label observer, all driven through a single ticker.

use glam::Vec3;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use stepwire_scene::{Aabb, DistanceSignal, IntersectionSignal, ProximitySignal, SceneTicker};

/// Externally-owned moving body the bindings read from.
struct Body {
    position: Rc<Cell<Vec3>>,
    half_extents: Vec3,
}

impl Body {
    fn new(position: Vec3, half_extents: Vec3) -> Self {
        Self {
            position: Rc::new(Cell::new(position)),
            half_extents,
        }
    }

    fn position_provider(&self) -> impl Fn() -> Vec3 + 'static {
        let position = Rc::clone(&self.position);
        move || position.get()
    }

    fn volume_provider(&self) -> impl Fn() -> Aabb + 'static {
        let position = Rc::clone(&self.position);
        let half = self.half_extents;
        move || Aabb::from_center_half_extents(position.get(), half)
    }
}

#[test]
fn distance_label_updates_only_on_change() {
    let sphere = Body::new(Vec3::new(0.0, 0.0, 0.0), Vec3::splat(0.5));
    let anchor = Body::new(Vec3::new(0.0, 0.0, 5.0), Vec3::splat(0.5));

    let distance = DistanceSignal::new(sphere.position_provider(), anchor.position_provider());
    let signal = distance.signal();

    let label = Rc::new(RefCell::new(String::new()));
    let label_sink = Rc::clone(&label);
    let updates = Rc::new(Cell::new(0));
    let updates_sink = Rc::clone(&updates);
    signal.subscribe(move |d| {
        *label_sink.borrow_mut() = format!("d: {d:.2}");
        updates_sink.set(updates_sink.get() + 1);
    });

    let mut ticker = SceneTicker::new().bind("distance", distance);

    // Nothing moves: label untouched.
    ticker.tick();
    ticker.tick();
    assert_eq!(updates.get(), 0);
    assert!(label.borrow().is_empty());

    sphere.position.set(Vec3::new(0.0, 0.0, 1.75));
    ticker.tick();
    assert_eq!(&*label.borrow(), "d: 3.25");
    assert_eq!(updates.get(), 1);

    // Holding still again: no redundant update.
    ticker.tick();
    assert_eq!(updates.get(), 1);
}

#[test]
fn deferred_label_observer_misses_early_frames() {
    let sphere = Body::new(Vec3::ZERO, Vec3::splat(0.5));
    let anchor = Body::new(Vec3::new(0.0, 0.0, 8.0), Vec3::splat(0.5));

    let distance = DistanceSignal::new(sphere.position_provider(), anchor.position_provider());
    let signal = distance.signal();

    let immediate = Rc::new(RefCell::new(Vec::new()));
    let immediate_sink = Rc::clone(&immediate);
    signal.subscribe(move |d| immediate_sink.borrow_mut().push(*d));

    let late = Rc::new(RefCell::new(Vec::new()));
    let late_sink = Rc::clone(&late);
    signal.subscribe_deferred(move |d| late_sink.borrow_mut().push(*d), 1);

    let mut ticker = SceneTicker::new().bind("distance", distance);

    sphere.position.set(Vec3::new(0.0, 0.0, 2.0));
    ticker.tick();
    sphere.position.set(Vec3::new(0.0, 0.0, 4.0));
    ticker.tick();

    assert_eq!(*immediate.borrow(), vec![6.0, 4.0]);
    assert_eq!(*late.borrow(), vec![4.0]);
}

#[test]
fn intersection_drives_material_toggle() {
    let sphere = Body::new(Vec3::new(4.0, 0.0, 0.0), Vec3::splat(0.5));
    let target = Body::new(Vec3::ZERO, Vec3::splat(0.5));

    let intersection = IntersectionSignal::new(sphere.volume_provider(), target.volume_provider());
    let signal = intersection.signal();

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Material {
        White,
        Red,
    }

    let material = Rc::new(Cell::new(Material::White));
    let material_sink = Rc::clone(&material);
    signal.subscribe(move |intersecting| {
        material_sink.set(if *intersecting {
            Material::Red
        } else {
            Material::White
        });
    });

    let mut ticker = SceneTicker::new().bind("intersection", intersection);

    ticker.tick();
    assert_eq!(material.get(), Material::White);

    sphere.position.set(Vec3::new(0.25, 0.0, 0.0));
    ticker.tick();
    assert_eq!(material.get(), Material::Red);

    sphere.position.set(Vec3::new(4.0, 0.0, 0.0));
    ticker.tick();
    assert_eq!(material.get(), Material::White);
}

#[test]
fn three_bindings_share_one_ticker() {
    let sphere = Body::new(Vec3::new(0.0, 0.0, 6.0), Vec3::splat(0.5));
    let anchor = Body::new(Vec3::ZERO, Vec3::splat(0.5));

    let distance = DistanceSignal::new(sphere.position_provider(), anchor.position_provider());
    let intersection = IntersectionSignal::new(sphere.volume_provider(), anchor.volume_provider());
    let proximity = ProximitySignal::new(
        sphere.position_provider(),
        anchor.position_provider(),
        1.25,
    );

    let events = Rc::new(RefCell::new(Vec::new()));
    for (tag, broadcaster) in [
        ("near", proximity.signal()),
        ("touch", intersection.signal()),
    ] {
        let sink = Rc::clone(&events);
        broadcaster.subscribe(move |v| sink.borrow_mut().push((tag, *v)));
    }
    let distance_log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&distance_log);
    distance.signal().subscribe(move |d| sink.borrow_mut().push(*d));

    let mut ticker = SceneTicker::new()
        .bind("distance", distance)
        .bind("intersection", intersection)
        .bind("proximity", proximity);
    assert_eq!(ticker.len(), 3);

    // Approach in stages: far -> near threshold -> touching.
    sphere.position.set(Vec3::new(0.0, 0.0, 1.25));
    ticker.tick();
    sphere.position.set(Vec3::new(0.0, 0.0, 0.75));
    ticker.tick();
    // Retreat out of range.
    sphere.position.set(Vec3::new(0.0, 0.0, 6.0));
    ticker.tick();

    assert_eq!(*distance_log.borrow(), vec![1.25, 0.75, 6.0]);
    assert_eq!(
        *events.borrow(),
        vec![("near", true), ("touch", true), ("touch", false), ("near", false)]
    );
}
