//! Feature-flag style conditions over a mutable fact set
//!
//! Run with: cargo run --example feature_flags

use expr_graph::Engine;
use std::collections::HashMap;

fn main() -> Result<(), expr_graph::EvalError> {
    let engine = Engine::new();

    let mut facts = HashMap::new();
    facts.insert("logged_in".to_string(), true);
    facts.insert("beta_tester".to_string(), true);
    facts.insert("maintenance".to_string(), false);
    facts.insert("staff".to_string(), false);

    let conditions = [
        "logged_in and !maintenance",
        "logged_in and (beta_tester or staff)",
        "staff or (beta_tester and !maintenance)",
        "!(logged_in and !maintenance)",
    ];

    println!("Initial facts: {:?}\n", facts);
    for condition in conditions {
        println!("{:45} => {}", condition, engine.evaluate(condition, &facts)?);
    }
    println!("\nRegistry holds {} nodes", engine.node_count());

    // Flip a fact. Cached values are served until the cache is invalidated.
    facts.insert("maintenance".to_string(), true);
    println!("\nAfter setting maintenance=true (cache still warm):");
    for condition in conditions {
        println!("{:45} => {}", condition, engine.evaluate(condition, &facts)?);
    }

    engine.invalidate_all();
    println!("\nAfter invalidate_all():");
    for condition in conditions {
        println!("{:45} => {}", condition, engine.evaluate(condition, &facts)?);
    }

    // Sharing: different spellings resolve to the same canonical node.
    println!(
        "\nCanonical form of \"(logged_in and !maintenance)\": {:?}",
        engine.canonicalize("(logged_in and !maintenance)")?
    );
    println!("Registry still holds {} nodes", engine.node_count());

    Ok(())
}
