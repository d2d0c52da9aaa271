#![allow(dead_code)]

use sparse_ecs::{EcsResult, Entity, EntityManager};

pub const ENTITIES_SMALL: usize = 10_000;
pub const ENTITIES_MED: usize = 100_000;

pub const COMPONENT_COUNT: usize = 32;

#[derive(Clone, Copy)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy)]
pub struct Mass {
    pub value: f32,
}

pub fn make_manager() -> EntityManager {
    let mut manager = EntityManager::new(COMPONENT_COUNT);
    manager.register_component::<Position>().unwrap();
    manager.register_component::<Velocity>().unwrap();
    manager.register_component::<Mass>().unwrap();
    manager.register_entity_set::<(Position,)>().unwrap();
    manager
        .register_entity_set::<(Position, Velocity)>()
        .unwrap();
    manager
        .register_entity_set::<(Position, Velocity, Mass)>()
        .unwrap();
    manager
}

pub fn populate(manager: &mut EntityManager, count: usize) -> EcsResult<Vec<Entity>> {
    let mut entities = Vec::with_capacity(count);
    for i in 0..count {
        let entity = manager.create_entity();
        manager.add_component(entity, Position { x: i as f32, y: i as f32 })?;
        manager.add_component(entity, Velocity { x: 1.0, y: 1.0 })?;
        manager.add_component(entity, Mass { value: 1.0 })?;
        entities.push(entity);
    }
    Ok(entities)
}
