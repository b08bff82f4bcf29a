use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Context;
use clap::Parser;
use glam::Vec3;
use shadowfall::config::SimulationConfig;
use shadowfall::creature::Environment;
use shadowfall::entity::{GroundLoot, Player};
use shadowfall::world::{DayNight, DayNightCycle, World};

/// Radius of the loop the scripted player walks
const PATROL_LOOP_RADIUS: f32 = 25.0;
/// Player walking speed along the loop, units per second
const PLAYER_WALK_SPEED: f32 = 2.0;
/// Pickups closer than this are collected
const PICKUP_RADIUS: f32 = 2.0;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// RON simulation config (defaults to the built-in presets)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the config's RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated seconds to run
    #[arg(long, default_value = "600")]
    seconds: f32,

    /// Simulation ticks per simulated second
    #[arg(long, default_value = "30")]
    tick_rate: u32,

    /// Seconds between population reports
    #[arg(long, default_value = "30")]
    report_every: f32,

    /// Override the starting time of day (0 = midnight, 0.5 = noon)
    #[arg(long)]
    start_time: Option<f32>,

    /// Write the effective config to this path and exit
    #[arg(long)]
    write_config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(start) = args.start_time {
        config.day_night.start_time_of_day = start;
    }

    if let Some(path) = &args.write_config {
        config
            .save(path)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        log::info!("Wrote config to {}", path.display());
        return Ok(());
    }

    if args.tick_rate == 0 {
        anyhow::bail!("--tick-rate must be at least 1");
    }

    run(&config, &args)
}

fn run(config: &SimulationConfig, args: &Args) -> anyhow::Result<()> {
    let delta_time = 1.0 / args.tick_rate as f32;
    let total_ticks = (args.seconds.max(0.0) * args.tick_rate as f32).round() as u64;
    let report_ticks = ((args.report_every.max(delta_time)) * args.tick_rate as f32).round() as u64;

    let mut nav = config.arena.build_navigation();
    let mut sky = DayNightCycle::new(&config.day_night);
    let mut loot = GroundLoot::new();
    let mut player = Player::new(Vec3::new(PATROL_LOOP_RADIUS, 0.0, 0.0));
    let mut world = World::from_config(config);

    let kills: Rc<RefCell<BTreeMap<String, u32>>> = Rc::default();
    let tally = Rc::clone(&kills);
    world.subscribe_deaths(move |notice| {
        *tally.borrow_mut().entry(notice.name.clone()).or_default() += 1;
    });

    log::info!(
        "Starting simulation: seed {}, {} s at {} ticks/s, time of day {:.2}",
        config.seed,
        args.seconds,
        args.tick_rate,
        sky.time_of_day()
    );

    for tick in 1..=total_ticks {
        sky.advance(delta_time);

        let angle = world.elapsed() * PLAYER_WALK_SPEED / PATROL_LOOP_RADIUS;
        player.position = Vec3::new(angle.cos(), 0.0, angle.sin()) * PATROL_LOOP_RADIUS;
        let target = world.creature_at(player.position, Player::ATTACK_REACH);
        let swing = player.try_swing(delta_time);

        {
            let mut env = Environment {
                nav: &mut nav,
                player: Some(&mut player),
                day_night: &sky,
                loot: &mut loot,
            };
            if let (true, Some(id)) = (swing, target) {
                world.damage_creature(id, Player::ATTACK_DAMAGE, &mut env);
            }
            world.tick(delta_time, &mut env);
        }

        let picked = loot.collect_near(player.position, PICKUP_RADIUS, &mut player.inventory);
        if picked > 0 {
            log::debug!("Picked up {} items", picked);
        }

        if tick % report_ticks.max(1) == 0 {
            log::info!(
                "[{:>7.1}s] {:>5.2}h {} | wildlife {} | shadows {} | threats nearby {} | player hp {:.0}",
                world.elapsed(),
                sky.hour(),
                if sky.is_night() { "night" } else { "day" },
                world.spawner().active_peaceful_count(),
                world.spawner().active_hostile_count(),
                world.hostiles_within(player.position, 20.0),
                player.health.current()
            );
        }

        if player.is_dead() {
            log::warn!("Player died after {:.1}s", world.elapsed());
            break;
        }
    }

    log::info!("Simulation finished after {:.1}s", world.elapsed());
    for (name, count) in kills.borrow().iter() {
        log::info!("  {} died: {}", name, count);
    }
    log::info!(
        "  loot left on the ground: {}, player inventory slots used: {}",
        loot.len(),
        player.inventory.used_slot_count()
    );

    Ok(())
}
