//! Behavioral tests for every prediction scheme.

use bpred::*;
use proptest::prelude::*;
use rstest::rstest;

/// Every counter value held by a predictor, across all of its tables.
fn all_counters(p: &Predictor) -> Vec<u8> {
    let tables: Vec<&PatternHistoryTable> = match p {
        Predictor::Static(_) => vec![],
        Predictor::Gshare(g) => vec![g.pht()],
        Predictor::Tournament(t) | Predictor::Custom(t) => {
            vec![t.local_pht(), t.global_pht(), t.choice_pht()]
        },
    };
    tables.iter()
        .flat_map(|t| t.counters().iter().map(|c| c.value()))
        .collect()
}

fn choice_counters(p: &Predictor) -> Vec<u8> {
    match p {
        Predictor::Tournament(t) | Predictor::Custom(t) => {
            t.choice_pht().counters().iter().map(|c| c.value()).collect()
        },
        _ => vec![],
    }
}

fn ghr(p: &Predictor) -> Option<HistoryRegister> {
    match p {
        Predictor::Static(_) => None,
        Predictor::Gshare(g) => Some(*g.ghr()),
        Predictor::Tournament(t) | Predictor::Custom(t) => Some(*t.ghr()),
    }
}

fn scheme_strategy() -> impl Strategy<Value = Scheme> {
    prop::sample::select(Scheme::ALL.to_vec())
}

fn branch_strategy() -> impl Strategy<Value = Vec<(u32, bool)>> {
    prop::collection::vec((0u32..64, any::<bool>()), 0..200)
}

proptest! {
    #[test]
    fn counters_stay_in_range(
        scheme in scheme_strategy(),
        g in 0u32..6, l in 0u32..6, pc_bits in 0u32..6,
        branches in branch_strategy()
    ) {
        let mut p = PredictorConfig::new(scheme, g, l, pc_bits).build();
        for (pc, taken) in branches {
            p.update(pc, Outcome::from(taken));
            prop_assert!(all_counters(&p).iter().all(|v| *v <= 3));
        }
    }

    #[test]
    fn history_tracks_latest_outcome(
        scheme in scheme_strategy(),
        g in 1u32..8,
        branches in branch_strategy()
    ) {
        let mut p = PredictorConfig::new(scheme, g, 4, 4).build();
        for (pc, taken) in branches {
            p.update(pc, Outcome::from(taken));
            if let Some(h) = ghr(&p) {
                prop_assert_eq!(h.value() & 1, taken as u32);
                prop_assert!(h.value() <= (1 << g) - 1);
            }
        }
    }

    #[test]
    fn predict_is_pure(
        scheme in scheme_strategy(),
        branches in branch_strategy(),
        probes in prop::collection::vec(any::<u32>(), 1..16)
    ) {
        let mut p = PredictorConfig::new(scheme, 5, 4, 3).build();
        for (pc, taken) in branches {
            p.update(pc, Outcome::from(taken));
        }
        let counters = all_counters(&p);
        let history = ghr(&p);
        let first: Vec<Outcome> = probes.iter().map(|pc| p.predict(*pc)).collect();
        let again: Vec<Outcome> = probes.iter().map(|pc| p.predict(*pc)).collect();
        prop_assert_eq!(first, again);
        prop_assert_eq!(all_counters(&p), counters);
        prop_assert_eq!(ghr(&p), history);
    }

    #[test]
    fn choice_moves_at_most_one_step(
        custom in any::<bool>(),
        branches in branch_strategy()
    ) {
        let scheme = if custom { Scheme::Custom } else { Scheme::Tournament };
        let mut p = PredictorConfig::new(scheme, 3, 3, 3).build();
        for (pc, taken) in branches {
            let before = choice_counters(&p);
            p.update(pc, Outcome::from(taken));
            let after = choice_counters(&p);
            let changed: Vec<i16> = before.iter().zip(after.iter())
                .map(|(b, a)| *a as i16 - *b as i16)
                .filter(|d| *d != 0)
                .collect();
            prop_assert!(changed.len() <= 1);
            prop_assert!(changed.iter().all(|d| d.abs() == 1));
        }
    }
}

#[rstest]
#[case(0)]
#[case(0x4)]
#[case(0xffff_fffc)]
fn static_always_predicts_taken(#[case] pc: u32) {
    let mut p = PredictorConfig::new(Scheme::Static, 14, 10, 10).build();
    for outcome in [Outcome::N, Outcome::T, Outcome::N] {
        assert_eq!(p.predict(pc), Outcome::T);
        p.update(pc, outcome);
    }
    assert!(all_counters(&p).is_empty());
    assert!(ghr(&p).is_none());
}

#[rstest]
#[case(Scheme::Gshare)]
#[case(Scheme::Tournament)]
#[case(Scheme::Custom)]
fn learns_biased_branch(#[case] scheme: Scheme) {
    let mut p = PredictorConfig::new(scheme, 6, 6, 6).build();
    // Warm up until global history saturates with ones.
    for _ in 0..16 {
        p.update(0x400, Outcome::T);
    }
    assert_eq!(p.predict(0x400), Outcome::T);
}

#[rstest]
#[case(Scheme::Gshare)]
#[case(Scheme::Tournament)]
#[case(Scheme::Custom)]
fn initialize_resets_state(#[case] scheme: Scheme) {
    let cfg = PredictorConfig::new(scheme, 4, 4, 4);
    let fresh = cfg.build();
    let mut p = cfg.build();
    for pc in 0..32 {
        p.update(pc * 4, Outcome::from(pc % 3 == 0));
    }
    p.initialize();
    assert_eq!(all_counters(&p), all_counters(&fresh));
    assert_eq!(ghr(&p), ghr(&fresh));
}

#[test]
fn tournament_and_custom_index_differently() {
    let t_cfg = PredictorConfig::new(Scheme::Tournament, 3, 2, 2);
    let c_cfg = PredictorConfig { scheme: Scheme::Custom, ..t_cfg };
    let (mut t, mut c) = match (t_cfg.build(), c_cfg.build()) {
        (Predictor::Tournament(t), Predictor::Custom(c)) => (t, c),
        _ => unreachable!(),
    };
    for outcome in [Outcome::T, Outcome::N] {
        t.update(0, outcome);
        c.update(0, outcome);
    }
    assert_eq!(t.ghr().value(), 2);
    assert_eq!(t.global_index(5), 2);
    assert_eq!(c.global_index(5), 7);
    for pc in [0u32, 8, 16, 0x1000] {
        assert_eq!(t.global_index(pc), c.global_index(pc));
    }
}
