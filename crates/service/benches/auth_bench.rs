use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use service::auth::domain::{LoginInput, RegisterInput};
use service::auth::service::{AuthConfig, AuthService};
use service::auth::TokenIssuer;
use service::storage::memory::MemoryStore;

fn bench_login(c: &mut Criterion) {
    let store = Arc::new(MemoryStore::default());
    let svc = AuthService::new(store, TokenIssuer::new("secret", chrono::Duration::hours(1)), AuthConfig::default());

    // pre-create user outside of the benchmark using a tokio runtime
    let rt = tokio::runtime::Runtime::new().unwrap();
    let _ = rt.block_on(svc.register(RegisterInput {
        name: Some("Bench".into()),
        id_number: Some("BENCH-1".into()),
        phone: Some("0700000000".into()),
        dl_number: Some("DL-BENCH-1".into()),
        dl_expire_date: Some("2030-01-01".into()),
        email: Some("bench@example.com".into()),
        password: Some("Benchmark1".into()),
    }));

    c.bench_function("auth_login_verify", |b| {
        b.iter(|| {
            let _ = rt
                .block_on(svc.login(LoginInput { id_number: Some("BENCH-1".into()), password: Some("Benchmark1".into()) }))
                .unwrap();
        });
    });
}

fn bench_token_verify(c: &mut Criterion) {
    let issuer = TokenIssuer::new("secret", chrono::Duration::hours(1));
    let token = issuer.issue(uuid::Uuid::new_v4()).unwrap();
    c.bench_function("token_verify", |b| {
        b.iter(|| issuer.verify(&token).unwrap());
    });
}

criterion_group!(benches, bench_login, bench_token_verify);
criterion_main!(benches);
