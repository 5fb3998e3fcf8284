use criterion::{Criterion, black_box, criterion_group, criterion_main};
use velocity::model::{HistoryPoint, ProviderData};
use velocity::projection::{FeaturedRecordView, citation_list, history_series};
use velocity::{
    Action, CircuitData, DashboardData, DashboardState, Driver, LapRecord, ProviderPayload,
    Source,
};
use std::time::Duration;

fn create_sample_circuit(index: usize) -> CircuitData {
    let name = format!("Circuit {}", index);
    CircuitData {
        name: name.clone(),
        location: "Somewhere".to_string(),
        length: "5.000km".to_string(),
        track_map_url: None,
        records: vec![LapRecord {
            circuit: name,
            driver: "Driver".to_string(),
            year: 2020,
            time: "1:21.046".to_string(),
            seconds: 81.046,
        }],
        history: (0..20)
            .rev()
            .map(|y| HistoryPoint {
                year: 2000 + y,
                time: 80. + y as f64 * 0.1,
            })
            .collect(),
    }
}

fn create_sample_data() -> DashboardData {
    DashboardData {
        standings: (1..=20)
            .map(|p| Driver {
                position: p,
                name: format!("Driver {}", p),
                team: "Team".to_string(),
                points: 400. - p as f64 * 10.,
                wins: 0,
                image_url: None,
            })
            .collect(),
        circuits: (0..24).map(create_sample_circuit).collect(),
        sources: (0..10)
            .map(|i| Source {
                title: Some(format!("Source {}", i)),
                uri: None,
            })
            .collect(),
    }
}

fn bench_state_transitions(c: &mut Criterion) {
    let mut group = c.benchmark_group("state");
    let data = create_sample_data();

    group.bench_function("ready_transition", |b| {
        b.iter(|| {
            let mut state = DashboardState::new();
            state.apply(Action::Loaded(black_box(data.clone())));
            black_box(state)
        });
    });

    group.bench_function("select_last_circuit", |b| {
        let mut state = DashboardState::new();
        state.apply(Action::Loaded(data.clone()));
        b.iter(|| state.select(black_box("Circuit 23")));
    });

    group.finish();
}

fn bench_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("projection");
    let data = create_sample_data();

    group.bench_function("frame_projection", |b| {
        b.iter(|| {
            let circuit = &data.circuits[0];
            black_box(FeaturedRecordView::of(Some(circuit)));
            black_box(history_series(circuit));
            black_box(citation_list(&data.sources, 3));
        });
    });

    group.finish();
}

fn bench_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialization");
    let data = create_sample_data();
    let payload = ProviderPayload {
        data: ProviderData {
            standings: Some(data.standings),
            circuits: Some(data.circuits),
        },
        sources: Some(data.sources),
    };
    let json = serde_json::to_string(&payload).unwrap();

    group.bench_function("decode_provider_payload", |b| {
        b.iter(|| {
            let payload = serde_json::from_str::<ProviderPayload>(&json).unwrap();
            black_box(DashboardData::from(payload))
        });
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(10))
        .sample_size(100);
    targets = bench_state_transitions, bench_projection, bench_serialization
}
criterion_main!(benches);
