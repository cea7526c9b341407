//! Prints the week board and the conflict audit for a seed file.
//!
//! Usage: `tutorgrid-audit <seed.json> [free|rooms]`

use color_eyre::eyre::{eyre, Result};
use dotenv::dotenv;
use tutorgrid_api::{config::ApiConfig, init_tracing};
use tutorgrid_core::conflict;
use tutorgrid_core::lanes::{LaneLabel, PlacementKind};
use tutorgrid_core::models::{time, ScheduleSlot};
use tutorgrid_core::week::{self, WeekBoard};
use tutorgrid_db::load_seed;

fn describe(slot: &ScheduleSlot) -> String {
    let details = &slot.details;
    let students: Vec<&str> = details.student_ids().iter().map(|id| id.as_str()).collect();
    format!(
        "{}-{} {} room {} teacher {} [{}]",
        time::format(details.start_time()),
        time::format(details.end_time()),
        details.subject(),
        details.room_id(),
        details.teacher_id(),
        students.join(", ")
    )
}

fn print_board(board: &WeekBoard) {
    for (day, day_board) in &board.days {
        if day_board.layout.lanes.is_empty() && day_board.layout.unplaced.is_empty() {
            continue;
        }
        println!("{} ({} lanes)", day, day_board.layout.lane_count());

        for lane in &day_board.layout.lanes {
            let label = match &lane.label {
                LaneLabel::Track(index) => format!("lane {}", index + 1),
                LaneLabel::Room(room) => format!("room {}", room),
            };
            for (_, slot, _) in lane.placements() {
                let marker = if day_board.conflicts.contains(&slot.id) { " !" } else { "" };
                println!("  {:<10} {}{}", label, describe(slot), marker);
            }
        }
        for unplaced in &day_board.layout.unplaced {
            println!("  unplaced   {} ({:?})", unplaced.slot_id, unplaced.reason);
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();

    let config = ApiConfig::from_env()?;
    init_tracing(config.log_level)?;

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .or_else(|| config.seed_path.as_ref().map(|path| path.display().to_string()))
        .ok_or_else(|| eyre!("usage: tutorgrid-audit <seed.json> [free|rooms]"))?;
    let placement = match args.next() {
        Some(raw) => raw.parse::<PlacementKind>().map_err(|e| eyre!(e))?,
        None => config.default_placement,
    };

    let seed = load_seed(&path)?;
    for (index, errors) in &seed.rejected {
        println!("rejected weekly_schedule[{}]: {}", index, errors);
    }

    let grid = config.grid()?;
    let strategy = placement.build(config.rooms.as_deref());
    let board = week::assemble_week(&seed.slots, &grid, strategy.as_ref());
    print_board(&board);

    let active: Vec<ScheduleSlot> = seed.slots.iter().filter(|slot| slot.details.is_active()).cloned().collect();
    let pairs = conflict::audit_pairs(&active);
    if pairs.is_empty() {
        println!("no conflicts");
    }
    for pair in &pairs {
        let resources: Vec<String> = pair.resources.iter().map(ToString::to_string).collect();
        println!("conflict on {}: {} / {} ({})", pair.day, pair.first, pair.second, resources.join(", "));
    }

    Ok(())
}
