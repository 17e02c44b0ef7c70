//! Token issue/verify throughput.
//!
//! The token service sits on every authenticated request, so regressions
//! here show up directly as request latency.

use criterion::{criterion_group, criterion_main, Criterion};

use climabill_auth::{Role, TokenService};
use climabill_core::{TenantId, UserId};

fn bench_issue(c: &mut Criterion) {
    let svc = TokenService::new(b"bench-secret");
    let user = UserId::new();
    let tenant = TenantId::new();

    c.bench_function("token_issue", |b| {
        b.iter(|| svc.issue(user, tenant, Role::Analyst).unwrap())
    });
}

fn bench_verify(c: &mut Criterion) {
    let svc = TokenService::new(b"bench-secret");
    let token = svc
        .issue(UserId::new(), TenantId::new(), Role::Analyst)
        .unwrap();

    c.bench_function("token_verify", |b| b.iter(|| svc.verify(&token).unwrap()));
}

criterion_group!(benches, bench_issue, bench_verify);
criterion_main!(benches);
