use skirmish_minimax::{
    alpha_beta::{MinimaxAgent, MoveOrdering, SearchDepth, SearchOptions},
    grid::Position,
    pathing::bfs_distance,
    state::{CombatState, Rules},
    utility::Evaluator,
    wire::Snapshot,
};

use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn load(fixture: &str) -> CombatState {
    let snapshot: Snapshot = serde_json::from_str(fixture).unwrap();
    snapshot.to_state(Rules::default())
}

fn create_agent(depth: i64, move_ordering: MoveOrdering) -> MinimaxAgent<CombatState, Evaluator> {
    MinimaxAgent::melee(
        SearchDepth::try_from(depth).unwrap(),
        Evaluator::default(),
        SearchOptions { move_ordering },
    )
}

fn bench_search_to_depth(c: &mut Criterion, depth: i64) {
    let state = load(include_str!("../fixtures/walled.json"));

    let mut group = c.benchmark_group(format!("Walled: Depth {}", depth));

    for ordering in MoveOrdering::ALL {
        group.bench_function(format!("alpha-beta {}", ordering), |b| {
            let agent = create_agent(depth, ordering);
            b.iter(|| agent.search(black_box(&state)))
        });
    }

    group.finish();
}

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("bfs walled", |b| {
        let state = load(include_str!("../fixtures/walled.json"));

        b.iter(|| {
            let state = black_box(&state);
            bfs_distance(&Position::new(0, 0), &Position::new(6, 6), state.arena())
        })
    });

    c.bench_function("children open_field", |b| {
        let state = load(include_str!("../fixtures/open_field.json"));

        b.iter(|| black_box(&state).children())
    });

    bench_search_to_depth(c, 1);
    bench_search_to_depth(c, 2);
    bench_search_to_depth(c, 3);
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
