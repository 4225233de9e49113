use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing::info;
use uuid::Uuid;

use volume_tracker::calendar::{is_current_week, shift_weeks, week_label};
use volume_tracker::{
    shade_for, Category, Config, FileStore, GoalTable, Muscle, MuscleValues, Shade, VolumeLedger,
};

#[derive(Parser)]
#[command(name = "volume-tracker", about = "Weekly training volume per muscle group")]
struct Cli {
    /// Any date inside the week to work on (YYYY-MM-DD, defaults to today)
    #[arg(long, global = true)]
    date: Option<NaiveDate>,

    /// Move the selected week by this many weeks; negative goes back
    #[arg(long, global = true, default_value_t = 0, allow_negative_numbers = true)]
    weeks: i64,

    /// Log at debug level
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Show the selected week against the goals (default)
    Week,
    /// Add one set, or one session for cardio
    Log { muscle: Muscle },
    /// Set the week's count for a muscle; 0 clears it
    Set { muscle: Muscle, count: u32 },
    /// List every logged week, most recent first
    History,
    /// Remove a logged week by id
    Delete { id: Uuid },
    /// Sum of every logged week
    Totals,
    /// Show the weekly goal for every muscle
    Goals,
    /// Change a muscle's weekly goal
    Goal {
        muscle: Muscle,
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },
    /// Delete all logged weeks
    Reset {
        /// Required, the history cannot be recovered
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> volume_tracker::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    let log_level = if cli.verbose { "debug" } else { config.log_filter.as_str() };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    info!("Using data directory {}", config.data_dir.display());
    let store = FileStore::open(&config.data_dir)?;
    let selected = shift_weeks(cli.date.unwrap_or_else(|| Local::now().date_naive()), cli.weeks);
    let mut app = TrackerApp::new(store, &config, selected);

    app.apply(cli.command.unwrap_or(Command::Week));
    Ok(())
}

struct TrackerApp {
    ledger: VolumeLedger<FileStore>,
    goals: GoalTable<FileStore>,
    selected: NaiveDate,
    today: NaiveDate,
}

impl TrackerApp {
    fn new(store: FileStore, config: &Config, selected: NaiveDate) -> Self {
        TrackerApp {
            ledger: VolumeLedger::open(store.clone(), config.week_start),
            goals: GoalTable::open(store),
            selected,
            today: Local::now().date_naive(),
        }
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::Week => self.show_week_display(),
            Command::Log { muscle } => {
                self.ledger.increment(self.selected, muscle);
                self.show_week_display();
            }
            Command::Set { muscle, count } => {
                self.ledger.set_count(self.selected, muscle, count);
                self.show_week_display();
            }
            Command::History => self.show_history_display(),
            Command::Delete { id } => {
                self.ledger.delete_week(id);
                self.show_history_display();
            }
            Command::Totals => self.show_all_time_display(),
            Command::Goals => self.show_goals_display(),
            Command::Goal { muscle, value } => {
                self.goals.set_goal(muscle, value);
                self.show_goals_display();
            }
            Command::Reset { yes } => {
                if yes {
                    self.ledger.clear_all();
                    println!("All workout history deleted.");
                } else {
                    println!("Pass --yes to delete all workout history.");
                }
            }
        }
    }

    fn show_week_display(&self) {
        let week = self.ledger.week_for(self.selected);
        let marker = if is_current_week(week.week_start, self.today) {
            " (this week)"
        } else {
            ""
        };
        println!("Week: {}{}", week_label(week.week_start), marker);

        for category in Category::ALL {
            println!();
            println!("{}", category.name());
            for muscle in category.muscles() {
                let count = week.count(*muscle);
                let goal = self.goals.goal_for(*muscle);
                let status = match shade_for(*muscle, count, goal) {
                    Shade::Empty => "-".to_string(),
                    Shade::Progress(ratio) => format!("{:.0}%", ratio * 100.0),
                    Shade::GoalMet => "goal met".to_string(),
                };
                println!("  • {:<12} {:>3} / {:<3} {}", muscle.name(), count, goal, status);
            }
        }
    }

    fn show_history_display(&self) {
        println!("History");
        if self.ledger.all_weeks().is_empty() {
            println!("  No weeks logged yet.");
        }
        for week in self.ledger.all_weeks() {
            let sets: u32 = week.values.iter().map(|(_, count)| count).sum();
            println!("  {:<18} {:>4} total  {}", week_label(week.week_start), sets, week.id);
        }
    }

    fn show_all_time_display(&self) {
        let totals: MuscleValues = self.ledger.all_time_totals();
        println!("All Time Stats");
        for category in Category::ALL {
            let line: Vec<String> = category
                .muscles()
                .iter()
                .map(|muscle| format!("{} {}", muscle.name(), totals.get(*muscle)))
                .collect();
            println!("  {:<7} {}", category.name(), line.join(", "));
        }
    }

    fn show_goals_display(&self) {
        println!("Volume Goals");
        for (muscle, goal) in self.goals.goals() {
            let unit = if muscle.is_cardio() { "sessions" } else { "sets" };
            println!("  • {:<12} {:>3} {}", muscle.name(), goal, unit);
        }
    }
}
