use broadside::{
    init_logging, ui, FleetSpec, GameConfig, Match, RandomTactician, Tactician,
};

use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Run a demo match between two randomly-playing participants.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Board edge length (5..=10).
    #[arg(long, default_value_t = 5)]
    size: u8,
    #[arg(long, default_value = "Player 1")]
    player1: String,
    #[arg(long, default_value = "Player 2")]
    player2: String,
    /// Fix RNG seed for reproducible games (e.g., --seed 12345).
    #[arg(long)]
    seed: Option<u64>,
    /// Print the match report as JSON instead of rendered boards.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let rng1 = match cli.seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => SmallRng::from_rng(&mut rand::rng()),
    };
    let rng2 = match cli.seed {
        Some(s) => SmallRng::seed_from_u64(s.wrapping_add(1)),
        None => SmallRng::from_rng(&mut rand::rng()),
    };
    // rng1/rng2 are independent streams so the players do not mirror each other
    let tactician1: Box<dyn Tactician> = Box::new(RandomTactician::new(rng1));
    let tactician2: Box<dyn Tactician> = Box::new(RandomTactician::new(rng2));

    let config = GameConfig::new(cli.size, FleetSpec::default(), &cli.player1, &cli.player2);
    let mut game = Match::new(&config, tactician1, tactician2)?;
    let report = game.run().await?;

    if cli.json {
        println!("{}", serde_json::to_string(&report)?);
        return Ok(());
    }

    for snapshot in &report.players {
        println!("\n{}'s board:", snapshot.name);
        print!("{}", ui::render_own_board(snapshot));
        println!("{}'s shots:", snapshot.name);
        print!(
            "{}",
            ui::render_tracking_board(snapshot.board.size(), &snapshot.attacks)
        );
    }
    println!(
        "\n{} wins after {} turns.",
        report.winner_name,
        report.turns.len()
    );
    Ok(())
}
