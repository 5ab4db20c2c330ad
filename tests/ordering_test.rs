use std::cmp::Ordering;

use eqclass::{Env, Generator, SymbolicEnv};

fn environments() -> Vec<Env<i64>> {
    let values = [-2, 0, 1, 3, 7];
    let mut envs = Vec::new();
    for x in values {
        for y in values {
            for z in values {
                envs.push(Env::new(x, y, z));
            }
        }
    }
    envs
}

#[test]
fn total_order_laws() {
    let trees = Generator::new(1).expressions(60, 3);

    for a in &trees {
        for b in &trees {
            let ab = a.cmp(b);
            assert_eq!(ab, b.cmp(a).reverse(), "{} {}", a, b);
            assert_eq!(ab == Ordering::Equal, a == b, "{} {}", a, b);
            assert_eq!(a == b, a.text() == b.text());
        }
    }

    for a in &trees {
        for b in &trees {
            for c in &trees {
                if a < b && b < c {
                    assert!(a < c, "{} < {} < {}", a, b, c);
                }
            }
        }
    }

    let mut sorted = trees.clone();
    sorted.sort();
    assert!(sorted.windows(2).all(|w| w[0] <= w[1]));
    assert!(sorted.windows(2).all(|w| w[0].height() <= w[1].height()));
}

#[test]
fn canonical_form_keeps_semantics() {
    let envs = environments();
    for tree in Generator::new(2).expressions(100, 4) {
        let shallow = tree.canonical_form();
        let deep = tree.canonical_tree();
        assert_eq!(shallow.canonical_form(), shallow);
        assert_eq!(deep.canonical_tree(), deep);
        assert_eq!(deep.height(), tree.height());

        for env in &envs {
            let expected = tree.evaluate(env);
            assert_eq!(shallow.evaluate(env), expected, "{} at {}", tree, env);
            assert_eq!(deep.evaluate(env), expected, "{} at {}", tree, env);
        }
    }
}

#[test]
fn symbolic_form_agrees_with_evaluation() {
    let symbolic_env = SymbolicEnv::new();
    let envs = environments();
    for tree in Generator::new(3).expressions(100, 4) {
        let symbolic = tree.to_symbolic(&symbolic_env);
        for env in &envs {
            assert_eq!(
                symbolic.evaluate(env),
                Some(tree.evaluate(env)),
                "{} ~ {} at {}",
                tree,
                symbolic,
                env
            );
        }
    }
}
