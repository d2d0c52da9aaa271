#![allow(dead_code)]

use sparse_ecs::EntityManager;

pub const COMPONENT_COUNT: usize = 32;
pub const SET_COUNT: usize = 32;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mass {
    pub value: f32,
}

pub fn x(i: usize) -> f32 {
    i as f32
}

pub fn y(i: usize) -> f32 {
    (i + 1) as f32
}

pub fn vx(i: usize) -> f32 {
    2.0 * i as f32
}

pub fn vy(i: usize) -> f32 {
    2.0 * (i + 1) as f32
}

pub fn mass(i: usize) -> f32 {
    3.0 * i as f32
}

pub fn make_manager() -> EntityManager {
    EntityManager::with_capacity(COMPONENT_COUNT, SET_COUNT)
}

/// Runs a scenario across the reserve and entity-count matrix.
pub fn run_cases(test: impl Fn(bool, usize)) {
    for reserve in [false, true] {
        for count in [1usize, 100, 10_000] {
            test(reserve, count);
        }
    }
}
