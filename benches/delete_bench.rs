use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use mesh_prune::prelude::*;

fn quad_grid(n: usize) -> PolyMesh {
    let mut mesh = PolyMesh::new();
    let verts: Vec<Vec<VertId>> = (0..=n)
        .map(|_| (0..=n).map(|_| mesh.add_vert()).collect())
        .collect();
    for y in 0..n {
        for x in 0..n {
            mesh.add_face(&[
                verts[y][x],
                verts[y][x + 1],
                verts[y + 1][x + 1],
                verts[y + 1][x],
            ])
            .expect("grid face");
        }
    }
    mesh
}

/// Checkerboard face flags: every survival rule in the Faces policy fires.
fn checkerboard_faces(mesh: &PolyMesh, flags: &mut FlagPool) -> FlagId {
    let flag = flags.alloc();
    for (i, f) in mesh.faces().into_iter().enumerate() {
        if i % 2 == 0 {
            flags.enable(flag, f).expect("live flag");
        }
    }
    flag
}

fn bench_delete_contexts(c: &mut Criterion) {
    let mut group = c.benchmark_group("delete_contexts");

    for &n in &[16usize, 32usize] {
        let mesh = quad_grid(n);

        for ctx in [
            DeleteContext::Faces,
            DeleteContext::OnlyFaces,
            DeleteContext::OnlyTagged,
        ] {
            group.bench_with_input(
                BenchmarkId::new(format!("{ctx:?}"), n),
                &n,
                |b, _| {
                    b.iter_batched(
                        || {
                            let mesh = mesh.clone();
                            let mut flags = FlagPool::new();
                            let flag = checkerboard_faces(&mesh, &mut flags);
                            (mesh, flags, flag)
                        },
                        |(mut mesh, mut flags, flag)| {
                            remove_tagged(&mut mesh, &mut flags, flag, ctx).expect("delete");
                            black_box(mesh);
                        },
                        criterion::BatchSize::SmallInput,
                    );
                },
            );
        }

        group.bench_with_input(BenchmarkId::new("Edges", n), &n, |b, _| {
            b.iter_batched(
                || {
                    let mesh = mesh.clone();
                    let mut flags = FlagPool::new();
                    let flag = flags.alloc();
                    for (i, e) in mesh.edges().into_iter().enumerate() {
                        if i % 3 == 0 {
                            flags.enable(flag, e).expect("live flag");
                        }
                    }
                    (mesh, flags, flag)
                },
                |(mut mesh, mut flags, flag)| {
                    remove_tagged(&mut mesh, &mut flags, flag, DeleteContext::Edges)
                        .expect("delete");
                    black_box(mesh);
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_delete_contexts);
criterion_main!(benches);
