use clap::Subcommand;
use focal_core::{Database, EnergyLevel, TaskType};

use super::{load_store, save_store};

#[derive(Subcommand)]
pub enum RecommendAction {
    /// Set the context the recommendation is computed from
    Context {
        /// Energy level: low, medium, or high
        #[arg(long)]
        energy: String,
        /// Task type: deep-work, creative, admin, or learning
        #[arg(long)]
        task: String,
    },
    /// Print the visible recommendation card as JSON (null while gated)
    Show,
    /// Accept the card, committing its durations
    Accept,
    /// Reject the card, keeping current durations
    Reject,
    /// Re-arm a previously rejected card
    Reset,
}

pub fn run(action: RecommendAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut store = load_store(&db);

    match action {
        RecommendAction::Context { energy, task } => {
            let energy: EnergyLevel = energy.parse()?;
            let task: TaskType = task.parse()?;
            store.set_energy(energy);
            if let Some(event) = store.set_task_type(task) {
                println!("{}", serde_json::to_string_pretty(&event)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&store.recommendation_card())?);
            }
        }
        RecommendAction::Show => {
            println!("{}", serde_json::to_string_pretty(&store.recommendation_card())?);
        }
        RecommendAction::Accept => match store.accept_recommendation() {
            Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
            None => {
                eprintln!("no recommendation to accept");
                std::process::exit(1);
            }
        },
        RecommendAction::Reject => match store.reject_recommendation() {
            Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
            None => {
                eprintln!("no recommendation to reject");
                std::process::exit(1);
            }
        },
        RecommendAction::Reset => {
            store.set_has_dismissed_recommendation_card(false);
            println!("{}", serde_json::to_string_pretty(&store.recommendation_card())?);
        }
    }

    save_store(&db, &store)?;
    Ok(())
}
