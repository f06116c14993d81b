use std::fs;
use std::path::Path;

use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use calorie_tracker_rs::cli::{Cli, Command, ItemArgs, SettingsArgs};
use calorie_tracker_rs::error::{Result, TrackerError};
use calorie_tracker_rs::interface::{
    display_entries, display_goals, display_items, display_settings, display_stats, prompt_grams,
    prompt_item, prompt_settings, select_item,
};
use calorie_tracker_rs::label::parse_label_text;
use calorie_tracker_rs::models::FoodItem;
use calorie_tracker_rs::state::{load_state, save_state, TrackerState};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("calorie_tracker_rs=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let date = cli.date.unwrap_or_else(|| Local::now().date_naive());
    let path = cli.file.as_path();
    let command = cli.command.unwrap_or_default();

    let mut state = load_state(path)?;

    match command {
        Command::Status => {
            display_stats(&state.goals(), &state.totals_for_date(date));
            Ok(())
        }
        Command::Goals => {
            display_goals(&state.goals());
            Ok(())
        }
        Command::Settings(args) => cmd_settings(path, &mut state, &args),
        Command::Adjust { delta } => {
            let adjustment = state.adjust_calories(delta);
            save_state(path, &state)?;
            println!("Caloric adjustment is now {:+}", adjustment);
            display_stats(&state.goals(), &state.totals_for_date(date));
            Ok(())
        }
        Command::AddItem(args) => cmd_add_item(path, &mut state, &args),
        Command::EditItem { id } => cmd_edit_item(path, &mut state, id),
        Command::Items => {
            display_items(&state.items());
            Ok(())
        }
        Command::DeleteItem { id } => {
            state.delete_item(id)?;
            save_state(path, &state)?;
            println!("Item {} deleted.", id);
            Ok(())
        }
        Command::Log { item, grams } => cmd_log(path, &mut state, date, item.as_deref(), grams),
        Command::Entries => {
            display_entries(&state.entries_for_date(date));
            Ok(())
        }
        Command::SetGrams { id, grams } => {
            if !state.update_entry_grams(id, grams)? {
                return Err(TrackerError::EntryNotFound(id));
            }
            save_state(path, &state)?;
            display_entries(&state.entries_for_date(date));
            display_stats(&state.goals(), &state.totals_for_date(date));
            Ok(())
        }
        Command::RemoveEntry { id } => {
            state.delete_entry(id)?;
            save_state(path, &state)?;
            display_stats(&state.goals(), &state.totals_for_date(date));
            Ok(())
        }
    }
}

/// Show settings, apply flags, or prompt for every setting.
fn cmd_settings(path: &Path, state: &mut TrackerState, args: &SettingsArgs) -> Result<()> {
    if args.show {
        display_settings(&state.settings());
        return Ok(());
    }

    let patch = args.patch();
    let patch = if patch.is_empty() {
        prompt_settings(&state.settings())?
    } else {
        patch
    };

    state.update_settings(&patch);
    save_state(path, state)?;

    display_settings(&state.settings());
    display_goals(&state.goals());
    Ok(())
}

/// Build the item from flags, label text and prompts, in that order of
/// precedence.
fn cmd_add_item(path: &Path, state: &mut TrackerState, args: &ItemArgs) -> Result<()> {
    let mut draft = match &args.label {
        Some(label_path) => {
            let text = fs::read_to_string(label_path)?;
            let facts = parse_label_text(&text);
            if facts.is_empty() {
                println!("Could not read that label");
            } else {
                println!("Label scanned");
            }
            facts.into_item(args.name.clone().unwrap_or_default())
        }
        None => FoodItem::new(args.name.clone().unwrap_or_default(), 0.0, Default::default()),
    };

    if let Some(name) = &args.name {
        draft.name = name.clone();
    }
    if let Some(grams) = args.grams {
        draft.base_grams = grams;
    }
    let overrides = [
        (args.calories, &mut draft.macros.calories),
        (args.protein, &mut draft.macros.protein),
        (args.fat, &mut draft.macros.fat),
        (args.carbs, &mut draft.macros.carbs),
        (args.fiber, &mut draft.macros.fiber),
    ];
    for (flag, slot) in overrides {
        if let Some(value) = flag {
            *slot = value;
        }
    }

    let item = if args.is_complete() {
        draft
    } else {
        prompt_item(Some(&draft))?
    };

    let id = state.add_item(item)?;
    save_state(path, state)?;
    if let Some(stored) = state.get_item(id) {
        println!("Item saved: [{}] {}", id, stored.item.name);
    }
    Ok(())
}

fn cmd_edit_item(path: &Path, state: &mut TrackerState, id: u64) -> Result<()> {
    let current = state
        .get_item(id)
        .map(|s| s.item.clone())
        .ok_or(TrackerError::ItemNotFound(id))?;

    let item = prompt_item(Some(&current))?;
    state.update_item(id, item)?;
    save_state(path, state)?;
    println!("Item updated");
    Ok(())
}

/// Log grams of an item on `date`.
fn cmd_log(
    path: &Path,
    state: &mut TrackerState,
    date: NaiveDate,
    query: Option<&str>,
    grams: Option<f64>,
) -> Result<()> {
    let items = state.items();
    if items.is_empty() {
        println!("Create an item first");
        return Ok(());
    }

    let Some(item_id) = select_item(&items, query)? else {
        return Ok(());
    };

    let grams = match grams {
        Some(g) => g,
        None => prompt_grams()?,
    };

    state.add_entry(item_id, grams, date)?;
    save_state(path, state)?;

    display_entries(&state.entries_for_date(date));
    display_stats(&state.goals(), &state.totals_for_date(date));
    Ok(())
}
