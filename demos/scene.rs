//! Scene Example - a small editor-like canvas layout
//!
//! This example demonstrates:
//! - Declaring spaces with typed scalars and the string grammar
//! - Fractions, auto-sized toolbars and a detached overlay
//! - Re-running layout after animating an extra size
//!
//! Run with: RUST_LOG=spark_spaces=trace cargo run --example scene

use std::error::Error;

use spark_spaces::{Direction, LayoutOptions, LayoutSolver, Scalar, Space, SpaceId, SpaceTree};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== spark-spaces Scene Example ===\n");

    let mut tree = SpaceTree::new();
    let root = tree.insert(
        Space::fixed(0.0, 0.0, 1280.0, 720.0)
            .named("window")
            .with_direction(Direction::Vertical)
            .with_padding("8".parse::<Scalar>()?)
            .with_gap(8.0),
    );

    // Toolbar: as tall as its tallest button
    let toolbar = tree.insert(
        Space::new()
            .named("toolbar")
            .with_size_y(Scalar::AUTO)
            .with_padding(4.0)
            .with_gap(4.0),
    );
    tree.attach(root, toolbar)?;
    tree.populate(toolbar, 4, |i| {
        Space::new()
            .named(format!("button-{i}"))
            .with_size(32.0, 32.0)
    })?;

    // Body: sidebar | canvas | inspector
    let body = tree.insert(Space::new().named("body").with_gap(8.0));
    tree.attach(root, body)?;

    let sidebar = tree.insert(Space::new().named("sidebar").with_size_x("1fr".parse::<Scalar>()?));
    let canvas = tree.insert(
        Space::new()
            .named("canvas")
            .with_size_x("4fr".parse::<Scalar>()?)
            .with_align_children(0.5, 0.5),
    );
    let inspector = tree.insert(Space::new().named("inspector").with_size_x(240.0));
    for id in [sidebar, canvas, inspector] {
        tree.attach(body, id)?;
    }

    // Artboard: square, sized by the smaller canvas axis, centered
    let artboard = tree.insert(
        Space::new()
            .named("artboard")
            .with_size("0.8sm".parse::<Scalar>()?, "0.8sm".parse::<Scalar>()?),
    );
    tree.attach(canvas, artboard)?;

    // Overlay badge near the canvas's top-right corner
    let badge = tree.insert(
        Space::new()
            .named("badge")
            .detached()
            .with_offset(Scalar::relative(0.95), 8.0)
            .with_size(24.0, 24.0),
    );
    tree.attach(canvas, badge)?;

    let mut solver = LayoutSolver::with_options(LayoutOptions::snapped());
    solver.compute(&mut tree, root)?;
    print_tree(&tree, root);

    // Animate the sidebar open by 120 units; fraction ratios stay put
    println!("\n--- sidebar extra +120 ---\n");
    if let Some(space) = tree.get_mut(sidebar) {
        space.extra_size_x = Scalar::absolute(120.0);
    }
    solver.compute(&mut tree, root)?;
    print_tree(&tree, root);

    Ok(())
}

fn print_tree(tree: &SpaceTree, root: SpaceId) {
    for id in std::iter::once(root).chain(tree.descendants(root)) {
        let depth = tree.ancestors(id).count();
        let Some(space) = tree.get(id) else { continue };
        let rect = space.rect();
        println!(
            "{:indent$}{:<12} x={:>6} y={:>6} w={:>6} h={:>6}",
            "",
            space.name.as_deref().unwrap_or("?"),
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            indent = depth * 2,
        );
    }
}
