use skiprank::{RankOptions, ranking::Ranker, skiplist::SkipList};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .init();

    let songs = vec![
        (162511, "Love Is Gone"),
        (272266, "MELANCHOLY"),
        (15815, "Monster"),
        (374203, "Something Just Like This"),
        (190709, "Nevada"),
        (143673, "bad guy"),
    ];

    let ranker = Ranker::new(RankOptions::new().seed(42).clone());
    let (plays, title) = ranker.top_one(songs.clone()).expect("rank songs failed");
    println!("top 1: {title} ({plays} plays)");

    for (plays, title) in ranker.top_n(songs.clone(), 3).expect("rank songs failed") {
        println!("  {title}: {plays}");
    }

    let mut list = SkipList::with_seed(10, 0.5, 42).expect("build skip list failed");
    list.extend(songs);
    print!("{list}");
}
