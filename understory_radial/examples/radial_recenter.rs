// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lay out a small tree, then re-center it on one of its branches.
//!
//! The example prints the `CURRENT` layout, starts a transition to a new root,
//! samples a few interpolated frames between `CURRENT` and `END`, and finally
//! closes the transition.
//!
//! Run:
//! - `cargo run -p understory_radial --example radial_recenter`

use understory_radial::{AdjacencyGraph, Epoch, Polar, RadialConfig, RadialLayout};

fn print_layout(title: &str, layout: &RadialLayout<&'static str>, epoch: Epoch) {
    println!("== {title} (root {})", layout.root());
    for &id in layout.tree().breadth_first() {
        let Some(Polar { theta, rho }) = layout.position(id, epoch) else {
            continue;
        };
        let depth = layout.node(id).map_or(0, |n| n.depth());
        println!(
            "{:indent$}{id:<8} theta={:>7.2}° rho={rho:>6.1}",
            "",
            theta.to_degrees(),
            indent = depth * 2
        );
    }
}

fn main() {
    let mut graph = AdjacencyGraph::new();
    for (id, dim) in [
        ("root", 10.0),
        ("docs", 12.0),
        ("src", 20.0),
        ("tests", 8.0),
        ("lib", 10.0),
        ("layout", 10.0),
        ("graph", 6.0),
        ("guide", 9.0),
    ] {
        graph.insert_with_dimension(id, dim);
    }
    for (a, b) in [
        ("root", "docs"),
        ("root", "src"),
        ("root", "tests"),
        ("src", "lib"),
        ("src", "layout"),
        ("src", "graph"),
        ("docs", "guide"),
    ] {
        graph.connect(a, b);
    }

    let config = RadialConfig::default().with_level_distance(80.0);
    let mut layout = RadialLayout::new("root", config);
    if let Err(err) = layout.compute(&mut graph) {
        eprintln!("layout failed: {err}");
        return;
    }
    print_layout("initial", &layout, Epoch::CURRENT);

    if let Err(err) = layout.recenter(&mut graph, "src") {
        eprintln!("recenter failed: {err}");
        return;
    }
    for step in [0.25, 0.5, 0.75] {
        let Some(from) = layout.point("root", Epoch::CURRENT) else {
            break;
        };
        let Some(to) = layout.point("root", Epoch::END) else {
            break;
        };
        let frame = from.lerp(to, step);
        println!("frame {step:.2}: old root at ({:.1}, {:.1})", frame.x, frame.y);
    }

    layout.finish_transition();
    print_layout("re-centered", &layout, Epoch::CURRENT);
}
