//! Shuttle
//!
//! A single convoy runs a loop between two docks, unloading what each dock
//! wants and loading what it has queued, then is retired while still carrying
//! cargo.
//!
//! Key concepts:
//! - Supplying Travel / Unload / Load behavior through `Phase`
//! - Trailing units placed behind the lead every tick
//! - Graceful removal and fleet accounting
//!
//! Run with: RUST_LOG=convoy=debug cargo run --example shuttle

use convoy::convoy::{
    CargoType, CargoUnit, ConvoyData, FleetCounters, Phase, Phases, RouteSnapshot,
    ServicePointId, ServicePointView,
};
use convoy::path::{move_towards, Path, Vec2};
use convoy::{ConvoyBuilder, ConvoyConfig, ConvoyStatus, TrailingUnit};
use std::collections::HashMap;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const COAL: CargoType = CargoType(0);
const GRAIN: CargoType = CargoType(1);

/// Drives the lead toward the next waypoint and docks at service stops.
struct Drive {
    speed: f32,
    stops: HashMap<usize, ServicePointId>,
}

impl Phase for Drive {
    fn tick(&mut self, data: &mut ConvoyData, delta_time: f32) {
        let Some(target) = data.path().point(data.cursor.index) else {
            return;
        };
        data.position = move_towards(data.position, target, self.speed * delta_time);
        if data.position != target {
            return;
        }

        if let Some(id) = self.stops.get(&data.cursor.index) {
            data.service_point = data.route().stop(*id).copied();
        }
        let (index, direction) = data
            .path()
            .next_index(data.cursor.index, data.cursor.direction);
        data.cursor.index = index;
        data.cursor.direction = direction;
    }
}

/// Moves cargo at a fixed rate.
struct Transfer {
    rate: f32,
    progress: f32,
    loading: bool,
}

impl Transfer {
    fn new(rate: f32, loading: bool) -> Self {
        Self {
            rate,
            progress: 0.0,
            loading,
        }
    }
}

impl Phase for Transfer {
    fn enter(&mut self, _data: &mut ConvoyData) {
        self.progress = 0.0;
    }

    fn tick(&mut self, data: &mut ConvoyData, delta_time: f32) {
        let Some(dock) = data.service_point else {
            return;
        };
        self.progress += self.rate * delta_time;
        while self.progress >= 1.0 {
            self.progress -= 1.0;
            if self.loading {
                // Each dock supplies what the other one wants.
                let supplied = if dock.demanded_type == COAL { GRAIN } else { COAL };
                data.cargo.push(CargoUnit::new(supplied));
            } else {
                data.cargo.take(dock.demanded_type);
            }
        }
    }

    fn exit(&mut self, data: &mut ConvoyData) {
        if self.loading {
            data.service_point = None;
        }
    }
}

struct Car {
    name: &'static str,
}

impl TrailingUnit for Car {
    fn move_to(&mut self, target: Vec2) {
        tracing::trace!(car = self.name, x = target.x, y = target.y, "car moved");
    }

    fn mark_for_removal(&mut self) {
        println!("  {} flagged for removal", self.name);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Shuttle Convoy ===\n");

    let docks = vec![
        ServicePointView {
            id: ServicePointId(0),
            demanded_type: COAL,
            queue_length: 20,
        },
        ServicePointView {
            id: ServicePointId(1),
            demanded_type: GRAIN,
            queue_length: 20,
        },
    ];
    let route = RouteSnapshot::new(
        Path::cyclic(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(6.0, 0.0),
            Vec2::new(6.0, 4.0),
            Vec2::new(0.0, 4.0),
        ]),
        docks,
    );

    let config = ConvoyConfig::from_json(r#"{ "speed": 4.0, "load_rate": 6.0 }"#).unwrap();
    let phases = Phases::new(
        Drive {
            speed: config.speed,
            stops: HashMap::from([(1, ServicePointId(0)), (3, ServicePointId(1))]),
        },
        Transfer::new(config.unload_rate, false),
        Transfer::new(config.load_rate, true),
    );

    let fleet = Arc::new(FleetCounters::new());
    let mut shuttle = ConvoyBuilder::new()
        .config(config)
        .phases(phases)
        .source(route)
        .accounting(fleet.clone())
        .build()
        .unwrap();
    shuttle.attach_trailing_unit(Box::new(Car { name: "car-1" }));
    shuttle.attach_trailing_unit(Box::new(Car { name: "car-2" }));

    println!("Convoy {} with {} cars", shuttle.id(), shuttle.trailing_count());
    println!("Capacity: {} units\n", shuttle.data().capacity());

    let delta_time = 0.05;
    for _ in 0..400 {
        shuttle.tick(delta_time);
    }

    println!("After 400 ticks:");
    println!("  State: {:?}", shuttle.state());
    println!("  Position: ({:.2}, {:.2})", shuttle.position().x, shuttle.position().y);
    println!(
        "  Cargo: {} coal, {} grain",
        shuttle.cargo().count_of(COAL),
        shuttle.cargo().count_of(GRAIN)
    );
    println!("  Transitions retained: {}\n", shuttle.history().transitions().len());

    println!("Retiring the shuttle...");
    shuttle.request_removal(|| println!("  Shuttle retired"));

    let mut ticks = 0;
    while shuttle.tick(delta_time) == ConvoyStatus::Active {
        ticks += 1;
    }

    println!("\nWound down in {} ticks", ticks);
    println!("Leads released: {}", fleet.leads_released());
    println!("Cars released: {}", fleet.trailing_released());
}
