mod logger;
mod distance;
mod initialization;
mod palette;
mod model;

use std::io::{self, BufRead};

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::logger::init_logger;
use crate::model::ClusterModel;
use crate::palette::default_palette;

const NUM_POINTS_DELTA: usize = 50;

#[derive(Parser, Debug)]
#[command(about = "Interactive k-means sandbox driven by console commands")]
struct Args {
    /// Viewport width used for random sampling
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    /// Viewport height used for random sampling
    #[arg(long, default_value_t = 800.0)]
    height: f64,

    /// Initial number of points
    #[arg(long, default_value_t = 100)]
    points: usize,

    /// Initial number of groups
    #[arg(long, default_value_t = 3)]
    groups: usize,

    /// Seed for the random source, entropy-based when omitted
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, PartialEq)]
enum Command {
    Groups,
    Centroids,
    Step,
    Reseed,
    AddGroup,
    RemoveGroup,
    AddPoints,
    RemovePoints,
    Place(f64, f64),
    Resize(f64, f64),
    State,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let mut tokens = line.split_whitespace();
    let command = match tokens.next()? {
        "groups" => Command::Groups,
        "centroids" => Command::Centroids,
        "step" => Command::Step,
        "reseed" => Command::Reseed,
        "add-group" => Command::AddGroup,
        "remove-group" => Command::RemoveGroup,
        "add-points" => Command::AddPoints,
        "remove-points" => Command::RemovePoints,
        "place" => {
            let x = tokens.next()?.parse().ok()?;
            let y = tokens.next()?.parse().ok()?;
            Command::Place(x, y)
        }
        "resize" => {
            let width = tokens.next()?.parse().ok()?;
            let height = tokens.next()?.parse().ok()?;
            Command::Resize(width, height)
        }
        "state" => Command::State,
        "help" => Command::Help,
        "quit" => Command::Quit,
        _ => return None,
    };
    Some(command)
}

fn print_help() {
    println!("commands:");
    println!("  groups             reassign every point to its nearest centroid");
    println!("  centroids          recompute centroid positions from current groups");
    println!("  step               both of the above, in that order");
    println!("  reseed             replace all points and centroids with fresh samples");
    println!("  add-group          grow the group count by one");
    println!("  remove-group       shrink the group count by one (floor of 1)");
    println!("  add-points         add {} random points", NUM_POINTS_DELTA);
    println!("  remove-points      remove {} points from the tail", NUM_POINTS_DELTA);
    println!("  place <x> <y>      add a group with its centroid at (x, y)");
    println!("  resize <w> <h>     update the viewport bounds");
    println!("  state              dump the current model state");
    println!("  quit               exit");
}

fn print_state(model: &ClusterModel) {
    let (width, height) = model.viewport();
    println!("viewport: {}x{}", width, height);
    println!("points: {}", model.points().len());
    println!("groups: {}", model.group_count());
    let mut member_counts = vec![0usize; model.group_count()];
    for idx in 0..model.points().len() {
        member_counts[model.group_of(idx)] += 1;
    }
    for (g, centroid) in model.centroids().iter().take(model.group_count()).enumerate() {
        let color = model.color_of(g);
        println!(
            "  group {}: centroid ({:.2}, {:.2}), {} members, color ({:.2}, {:.2}, {:.2})",
            g, centroid[0], centroid[1], member_counts[g], color[0], color[1], color[2]
        );
    }
}

fn main() {
    init_logger().expect("Failed to initialize logger");
    let args = Args::parse();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut model = ClusterModel::new(
        args.width,
        args.height,
        args.points,
        args.groups,
        default_palette(),
        &mut rng,
    );
    log::info!(
        "Model ready: {} points, {} groups in a {}x{} viewport",
        model.points().len(),
        model.group_count(),
        args.width,
        args.height
    );
    print_help();

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };
        let Some(command) = parse_command(&line) else {
            if !line.trim().is_empty() {
                log::warn!("Unrecognized command: {}", line.trim());
            }
            continue;
        };

        match command {
            Command::Groups => {
                model.reassign_groups();
                log::info!("Groups recalculated.");
            }
            Command::Centroids => {
                model.update_centroids();
                log::info!("Centroids recalculated.");
            }
            Command::Step => {
                model.reassign_groups();
                model.update_centroids();
                log::info!("Groups and centroids recalculated.");
            }
            Command::Reseed => {
                model.reseed(&mut rng);
                log::info!("Data re-randomized.");
            }
            Command::AddGroup => {
                model.add_group(&mut rng);
                log::info!("Group added, now ngroups = {}", model.group_count());
            }
            Command::RemoveGroup => {
                model.remove_group();
                log::info!("Group removed, now ngroups = {}", model.group_count());
            }
            Command::AddPoints => {
                let extra = model.random_points(NUM_POINTS_DELTA, &mut rng);
                model.add_points(extra);
                log::info!(
                    "Points: added {}, total is now {}",
                    NUM_POINTS_DELTA,
                    model.points().len()
                );
            }
            Command::RemovePoints => {
                model.remove_points(NUM_POINTS_DELTA);
                log::info!(
                    "Points: removed {}, total is now {}",
                    NUM_POINTS_DELTA,
                    model.points().len()
                );
            }
            Command::Place(x, y) => {
                model.add_centroid_at(x, y, &mut rng);
                log::info!("Centroid placed at {:.0}, {:.0}", x, y);
            }
            Command::Resize(width, height) => {
                model.resize(width, height);
                log::info!("Viewport resized to {}x{}", width, height);
            }
            Command::State => print_state(&model),
            Command::Help => print_help(),
            Command::Quit => break,
        }
    }
}
