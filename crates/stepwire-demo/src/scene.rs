#![forbid(unsafe_code)]

//! The scripted demo scene.
//!
//! One body orbits an anchored "hello" body on an elliptical path. Three
//! bindings watch the pair: raw distance feeds a text label (with the label
//! observer joining one frame late), proximity and intersection feed a
//! material color. All state the subscribers write lives in shared cells so
//! the run loop can report it afterwards.

use std::cell::{Cell, RefCell};
use std::f32::consts::TAU;
use std::rc::Rc;

use glam::Vec3;
use stepwire_scene::{Aabb, DistanceSignal, IntersectionSignal, ProximitySignal, SceneTicker};

/// Frames per full orbit.
const ORBIT_FRAMES: u64 = 120;
/// Orbit radii; the narrow z radius makes the body dip in and out of reach.
const ORBIT_RADIUS_X: f32 = 3.0;
const ORBIT_RADIUS_Z: f32 = 0.8;

const BODY_HALF_EXTENTS: Vec3 = Vec3::splat(0.5);
const ANCHOR_POSITION: Vec3 = Vec3::new(0.0, 1.0, 5.0);

/// Material state of the anchored body, driven by two boolean signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Material {
    White,
    Red,
    Blue,
}

impl Material {
    fn from_flags(intersecting: bool, near: bool) -> Self {
        if intersecting {
            Material::Red
        } else if near {
            Material::Blue
        } else {
            Material::White
        }
    }
}

/// Counters the run loop prints at the end.
#[derive(Debug, Default)]
pub struct SceneStats {
    pub label_updates: u64,
    pub contacts: u64,
    pub approaches: u64,
}

pub struct DemoScene {
    ticker: SceneTicker,
    orbiter: Rc<Cell<Vec3>>,
    label: Rc<RefCell<String>>,
    material: Rc<Cell<Material>>,
    label_updates: Rc<Cell<u64>>,
    contacts: Rc<Cell<u64>>,
    approaches: Rc<Cell<u64>>,
}

impl DemoScene {
    pub fn build(epsilon: f32, threshold: f32) -> Self {
        let orbiter = Rc::new(Cell::new(orbit_position(0)));
        let label = Rc::new(RefCell::new(String::from("d: ?")));
        let material = Rc::new(Cell::new(Material::White));
        let label_updates = Rc::new(Cell::new(0_u64));
        let contacts = Rc::new(Cell::new(0_u64));
        let approaches = Rc::new(Cell::new(0_u64));

        let orbiter_pos = {
            let orbiter = Rc::clone(&orbiter);
            move || orbiter.get()
        };
        let anchor_pos = || ANCHOR_POSITION;
        let orbiter_volume = {
            let orbiter = Rc::clone(&orbiter);
            move || Aabb::from_center_half_extents(orbiter.get(), BODY_HALF_EXTENTS)
        };
        let anchor_volume = || Aabb::from_center_half_extents(ANCHOR_POSITION, BODY_HALF_EXTENTS);

        let distance = if epsilon > 0.0 {
            DistanceSignal::with_epsilon(orbiter_pos.clone(), anchor_pos, epsilon)
        } else {
            DistanceSignal::new(orbiter_pos.clone(), anchor_pos)
        };
        let intersection = IntersectionSignal::new(orbiter_volume, anchor_volume);
        let proximity = ProximitySignal::new(orbiter_pos, anchor_pos, threshold);

        // The label observer joins one frame late, so the seed distance never
        // overwrites the placeholder text.
        {
            let label = Rc::clone(&label);
            let updates = Rc::clone(&label_updates);
            distance.signal().subscribe_deferred(
                move |d| {
                    *label.borrow_mut() = format!("d: {d:.2}");
                    updates.set(updates.get() + 1);
                },
                1,
            );
        }

        // Shared flags recomputing the material on either transition.
        let intersecting = Rc::new(Cell::new(false));
        let near = Rc::new(Cell::new(false));
        {
            let intersecting = Rc::clone(&intersecting);
            let near = Rc::clone(&near);
            let material = Rc::clone(&material);
            let contacts = Rc::clone(&contacts);
            intersection.signal().subscribe(move |hit| {
                intersecting.set(*hit);
                if *hit {
                    contacts.set(contacts.get() + 1);
                    tracing::info!("contact");
                }
                material.set(Material::from_flags(intersecting.get(), near.get()));
            });
        }
        {
            let near_flag = Rc::clone(&near);
            let material = Rc::clone(&material);
            let approaches = Rc::clone(&approaches);
            proximity.signal().subscribe(move |close| {
                near_flag.set(*close);
                if *close {
                    approaches.set(approaches.get() + 1);
                }
                material.set(Material::from_flags(intersecting.get(), near_flag.get()));
            });
        }

        let ticker = SceneTicker::new()
            .bind("distance", distance)
            .bind("intersection", intersection)
            .bind("proximity", proximity);

        Self {
            ticker,
            orbiter,
            label,
            material,
            label_updates,
            contacts,
            approaches,
        }
    }

    /// Move the orbiter to its position for `frame`, then run one tick.
    pub fn advance(&mut self, frame: u64) {
        self.orbiter.set(orbit_position(frame));
        self.ticker.tick();
    }

    pub fn frame_id(&self) -> u64 {
        self.ticker.frame_id()
    }

    pub fn label(&self) -> String {
        self.label.borrow().clone()
    }

    pub fn material(&self) -> Material {
        self.material.get()
    }

    pub fn stats(&self) -> SceneStats {
        SceneStats {
            label_updates: self.label_updates.get(),
            contacts: self.contacts.get(),
            approaches: self.approaches.get(),
        }
    }
}

/// Elliptical orbit around the anchor in the x/z plane.
fn orbit_position(frame: u64) -> Vec3 {
    let angle = (frame % ORBIT_FRAMES) as f32 / ORBIT_FRAMES as f32 * TAU;
    ANCHOR_POSITION
        + Vec3::new(
            ORBIT_RADIUS_X * angle.cos(),
            0.0,
            ORBIT_RADIUS_Z * angle.sin(),
        )
}
