use anyhow::bail;
use fs_err::File;
use pelada::{
    FormationWorkflow, GameDocument, InMemoryGameStore, IngestConfig, Rng, Side, WorkflowState,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let Some(game_file) = args.next() else {
        bail!("missing arguments\nusage: cargo run --example form_teams -- GAME.JSON [SEED]");
    };
    let seed = args.next().map(|s| s.parse::<u64>()).transpose()?;
    let rng = || seed.map_or_else(Rng::new, |seed| Rng::seeded(seed, seed ^ 0x9e37_79b9));

    let game: GameDocument = serde_json::from_reader(File::open(game_file)?)?;
    let game_id = game.id.clone();
    let mut store = InMemoryGameStore::new(IngestConfig::default(), rng());
    store.insert_game(game);

    let mut workflow = FormationWorkflow::with_rng(store, game_id.clone(), rng());
    workflow.load().await?;
    workflow.shuffle();

    let Some(session) = workflow.session() else {
        bail!("session not ready");
    };
    for side in [Side::A, Side::B] {
        let team = session.formation.team(side);
        println!(
            "{} ({}): {:.1}{}",
            side,
            session.colors.select(side),
            team.rating(),
            if team.has_goalkeeper() {
                ""
            } else {
                "  [no goalkeeper]"
            }
        );
        for player in team.iter() {
            println!("  {:<24} {:<12} {:.1}", player.name, player.position, player.rating);
        }
    }
    let balance = session.formation.balance();
    println!(
        "difference {:.1}: {}",
        balance.difference(),
        if balance.is_balanced {
            "balanced"
        } else {
            "unbalanced"
        }
    );

    if let Some(summary) = workflow.request_confirm() {
        if summary.has_unassigned() {
            println!("{} player(s) without a team", summary.unassigned_count);
        }
    }
    workflow.confirm().await?;
    if let WorkflowState::Confirmed(teams) = workflow.state() {
        println!(
            "committed {} vs {} for {}",
            teams.a.len(),
            teams.b.len(),
            game_id
        );
    }

    Ok(())
}
