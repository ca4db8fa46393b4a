use clap::{Parser, Subcommand};
use uuid::Uuid;

/// Terminal view of the dish board.
#[derive(Parser, Debug)]
#[command(name = "dish-watch", version, about = "Dish board in the terminal")]
pub struct Cli {
    /// dish-server root URL
    #[arg(
        long,
        global = true,
        default_value = "http://127.0.0.1:5000",
        env = "DISH_SERVER_URL"
    )]
    pub server: String,

    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print every dish with the header counters
    List,

    /// Flip a dish's publish flag
    Toggle {
        /// Record id as shown by `list`
        id: Uuid,
    },

    /// Replace all records with the sample dishes
    Reseed,

    /// Keep the board on screen and redraw on every pushed change
    Watch,
}
