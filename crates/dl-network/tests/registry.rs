//! Integration tests for the opening registry.

use dl_core::OpeningId;
use dl_coupling::{CouplingRegime, OpeningCoefficients, OpeningKind};
use dl_network::{Network, NetworkError, NodeHydraulics};
use proptest::prelude::*;

fn coeffs() -> OpeningCoefficients {
    OpeningCoefficients {
        orifice: 0.167,
        free_weir: 0.54,
        submerged_weir: 0.056,
    }
}

#[test]
fn opening_lifecycle_on_one_node() {
    let mut net = Network::new();
    net.add_node("J0", NodeHydraulics::default()).unwrap();
    let j1 = net.add_node("J1", NodeHydraulics::default()).unwrap();
    let openings = net.node_mut(j1).unwrap().openings_mut();

    // First opening
    openings
        .upsert(OpeningId(0), OpeningKind::Grate, 25.0, 1.0, coeffs())
        .unwrap();
    assert_eq!(openings.len(), 1);
    let first = openings.get(OpeningId(0)).unwrap();
    assert_eq!(first.regime(), CouplingRegime::NoCouplingFlow);
    assert_eq!(first.inflow(), 0.0);

    // Re-setting an existing id does not grow the set
    openings
        .upsert(OpeningId(0), OpeningKind::Grate, 25.0, 1.0, coeffs())
        .unwrap();
    openings
        .upsert(OpeningId(1), OpeningKind::Grate, 10.0, 5.0, coeffs())
        .unwrap();
    assert_eq!(openings.len(), 2);

    // Closed openings still count
    openings.close(OpeningId(1)).unwrap();
    openings
        .upsert(OpeningId(0), OpeningKind::Grate, 25.0, 1.0, coeffs())
        .unwrap();
    assert_eq!(openings.len(), 2);

    // Reopen, reconfigure, add a third
    openings.open(OpeningId(1)).unwrap();
    openings
        .upsert(OpeningId(1), OpeningKind::Grate, 10.0, 5.0, coeffs())
        .unwrap();
    openings
        .upsert(OpeningId(2), OpeningKind::Grate, 10.0, 5.0, coeffs())
        .unwrap();
    assert_eq!(openings.len(), 3);

    // Delete down to zero
    openings.remove(OpeningId(1)).unwrap();
    assert_eq!(openings.len(), 2);
    openings.remove(OpeningId(0)).unwrap();
    assert_eq!(openings.len(), 1);
    openings.remove(OpeningId(2)).unwrap();
    assert_eq!(openings.len(), 0);

    // Deleting from an empty node reports the unknown id
    let err = openings.remove(OpeningId(0)).unwrap_err();
    assert!(matches!(err, NetworkError::UnknownOpening { .. }));

    // Refill and clear
    openings
        .upsert(OpeningId(0), OpeningKind::Grate, 25.0, 1.0, coeffs())
        .unwrap();
    openings
        .upsert(OpeningId(1), OpeningKind::Grate, 10.0, 5.0, coeffs())
        .unwrap();
    assert_eq!(openings.len(), 2);
    openings.clear();
    assert_eq!(openings.len(), 0);
}

#[test]
fn sparse_ids_are_independent_per_node() {
    let mut net = Network::new();
    let a = net.add_node("A", NodeHydraulics::default()).unwrap();
    let b = net.add_node("B", NodeHydraulics::default()).unwrap();

    net.node_mut(a)
        .unwrap()
        .openings_mut()
        .upsert(OpeningId(1000), OpeningKind::Manhole, 1.0, 3.0, coeffs())
        .unwrap();
    net.node_mut(b)
        .unwrap()
        .openings_mut()
        .upsert(OpeningId(1000), OpeningKind::Grate, 2.0, 2.0, coeffs())
        .unwrap();

    net.node_mut(a)
        .unwrap()
        .openings_mut()
        .remove(OpeningId(1000))
        .unwrap();
    assert_eq!(net.node(a).unwrap().openings().len(), 0);
    assert_eq!(net.node(b).unwrap().openings().len(), 1);

    net.clear_openings();
    assert!(net.nodes().iter().all(|n| n.openings().is_empty()));
}

#[derive(Debug, Clone)]
enum Op {
    Upsert(u32),
    Remove(u32),
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0_u32..8).prop_map(Op::Upsert),
        2 => (0_u32..8).prop_map(Op::Remove),
        1 => Just(Op::Clear),
    ]
}

proptest! {
    #[test]
    fn count_tracks_distinct_live_ids(ops in prop::collection::vec(op(), 0..64)) {
        let mut net = Network::new();
        let j = net.add_node("J", NodeHydraulics::default()).unwrap();
        let openings = net.node_mut(j).unwrap().openings_mut();
        let mut live = std::collections::BTreeSet::new();

        for op in ops {
            match op {
                Op::Upsert(id) => {
                    let before = openings.len();
                    openings.upsert(OpeningId(id), OpeningKind::Grate, 1.0, 1.0, coeffs()).unwrap();
                    let grew = live.insert(id);
                    prop_assert_eq!(openings.len(), before + usize::from(grew));
                }
                Op::Remove(id) => {
                    let res = openings.remove(OpeningId(id));
                    prop_assert_eq!(res.is_ok(), live.remove(&id));
                }
                Op::Clear => {
                    openings.clear();
                    live.clear();
                }
            }
            prop_assert_eq!(openings.len(), live.len());
            for &id in &live {
                prop_assert_eq!(openings.get(OpeningId(id)).unwrap().id, OpeningId(id));
            }
        }
    }
}
