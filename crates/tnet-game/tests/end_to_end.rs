//! End-to-end lifecycle: topology in, firings proved and verified, the win
//! condition provable exactly when reached, and a full showdown proof.

use std::sync::Arc;

use anyhow::Context;

use tnet_core::{Card, NetDescription, PetriNet, PlaceId, TransitionId};
use tnet_circuit::{ShowdownCircuit, TerminalCircuit, TransitionCircuit};
use tnet_game::{GameRegistry, Table};
use tnet_zkp::{ProofSystem, TransparentProofSystem, VerifyError};

/// A two-flag capture game: the win transition needs both captures.
fn capture_net() -> Arc<PetriNet> {
    let desc: NetDescription = serde_json::from_str(
        r#"{
            "places": [
                {"name": "flag_a", "initial": 1},
                {"name": "flag_b", "initial": 1},
                {"name": "captured_a"},
                {"name": "captured_b"},
                {"name": "victory"}
            ],
            "transitions": [
                {"name": "capture_a", "inputs": ["flag_a"], "outputs": ["captured_a"]},
                {"name": "capture_b", "inputs": ["flag_b"], "outputs": ["captured_b"]},
                {"name": "win", "inputs": ["captured_a", "captured_b"], "outputs": ["victory"]}
            ],
            "outcome_places": ["victory"]
        }"#,
    )
    .expect("valid description");
    Arc::new(PetriNet::from_description(&desc).expect("valid net"))
}

fn card(s: &str) -> Card {
    s.parse().expect("valid card")
}

#[test]
fn test_full_game_with_proofs_at_every_step() -> anyhow::Result<()> {
    let net = capture_net();
    let registry = GameRegistry::new();
    let (_, session) = registry.create(net.clone());
    let system = TransparentProofSystem;
    let mut session = session.lock().expect("unpoisoned");

    let capture_a = net.transition_by_name("capture_a").context("declared")?;
    let capture_b = net.transition_by_name("capture_b").context("declared")?;
    let win = net.transition_by_name("win").context("declared")?;
    let victory = net.place_by_name("victory").context("declared")?;

    // The win transition cannot fire until both captures happened.
    assert!(session.fire(win).is_err());

    for transition in [capture_a, capture_b] {
        let firing = session.fire(transition)?;
        let circuit = TransitionCircuit::with_witness(&net, firing.witness.clone())?;
        let proof = system.prove(&circuit)?;
        let inputs = TransitionCircuit::public_inputs(
            &firing.record.pre_root,
            &firing.record.post_root,
            transition,
        );
        system.verify(&TransitionCircuit::blank(&net), &inputs, &proof)?;
    }

    // Both captures done: the win transition is enabled exactly now.
    let firing = session.fire(win)?;
    let circuit = TransitionCircuit::with_witness(&net, firing.witness.clone())?;
    let proof = system.prove(&circuit)?;
    let inputs =
        TransitionCircuit::public_inputs(&firing.record.pre_root, &firing.record.post_root, win);
    system.verify(&TransitionCircuit::blank(&net), &inputs, &proof)?;

    // Terminal proof for the victory place succeeds.
    assert!(session.outcome_reached(victory));
    let marking = session.marking().clone();
    let root = session.current_root();
    let terminal = TerminalCircuit::with_witness(&net, marking, victory)?;
    let terminal_proof = system.prove(&terminal)?;
    let terminal_inputs = TerminalCircuit::public_inputs(&root, victory);
    system.verify(&TerminalCircuit::blank(&net), &terminal_inputs, &terminal_proof)?;

    // The same proof cannot back a claim for any other place.
    for wrong in 0..net.num_places() {
        let wrong = PlaceId(wrong);
        if wrong == victory {
            continue;
        }
        let wrong_inputs = TerminalCircuit::public_inputs(&root, wrong);
        assert!(
            system
                .verify(&TerminalCircuit::blank(&net), &wrong_inputs, &terminal_proof)
                .is_err(),
            "claim for {wrong} should not verify"
        );
    }
    Ok(())
}

#[test]
fn test_adversarial_post_markings_never_verify() {
    let net = capture_net();
    let system = TransparentProofSystem;
    let pre = net.initial_marking().clone();

    // For each transition, attempt the dishonest "it fired anyway" witness
    // built from a hand-crafted post-marking.
    for t in 0..net.num_transitions() {
        let t = TransitionId(t);
        if net.enabled(&pre, t) {
            continue;
        }
        let mut counts = pre.counts().to_vec();
        for &p in net.outputs(t) {
            counts[p.index()] += 1;
        }
        let bad = tnet_circuit::TransitionWitness {
            pre_marking: pre.clone(),
            post_marking: tnet_core::Marking::new(counts),
            transition: t,
        };
        // Honest-path construction refuses outright.
        assert!(TransitionCircuit::with_witness(&net, bad.clone()).is_err());
        // And the constraint layer itself has no satisfying assignment.
        let circuit = TransitionCircuit::with_witness_unchecked(&net, bad);
        assert!(system.prove(&circuit).is_err());
    }
}

#[test]
fn test_showdown_proof_roundtrip() {
    let mut rng = rand::thread_rng();
    let community = ["Qh", "Jh", "Th", "4d", "2c"].map(card);
    let mut table = Table::new(community);
    table.seat(&mut rng, [card("4c"), card("4s")]); // trips
    let (strong, _) = table.seat(&mut rng, [card("Ah"), card("Kh")]); // royal straight flush
    let (folded_seat, _) = table.seat(&mut rng, [card("9d"), card("9c")]);
    table.fold(folded_seat).expect("seat exists");

    let (public, openings) = table.showdown().expect("active seats");
    assert_eq!(public.winner, strong);

    let system = TransparentProofSystem;
    let circuit =
        ShowdownCircuit::with_witness(public.clone(), openings).expect("consistent showdown");
    let proof = system.prove(&circuit).expect("provable");
    system
        .verify(
            &ShowdownCircuit::blank(public.claims.len()),
            &public.to_inputs(),
            &proof,
        )
        .expect("showdown proof verifies");

    // Re-pointing the public winner at the losing seat must not verify.
    let mut forged = public.clone();
    forged.winner = 0;
    let result = system.verify(
        &ShowdownCircuit::blank(public.claims.len()),
        &forged.to_inputs(),
        &proof,
    );
    assert!(matches!(
        result,
        Err(VerifyError::PublicInputMismatch(_)) | Err(VerifyError::Rejected { .. })
    ));
}

#[test]
fn test_proof_for_one_game_does_not_verify_for_another() {
    let net = capture_net();
    let system = TransparentProofSystem;
    let registry = GameRegistry::new();
    let (_, game_a) = registry.create(net.clone());
    let (_, game_b) = registry.create(net.clone());

    let capture_a = net.transition_by_name("capture_a").expect("declared");
    let capture_b = net.transition_by_name("capture_b").expect("declared");

    let firing_a = game_a
        .lock()
        .expect("unpoisoned")
        .fire(capture_a)
        .expect("enabled");
    let firing_b = game_b
        .lock()
        .expect("unpoisoned")
        .fire(capture_b)
        .expect("enabled");

    let circuit =
        TransitionCircuit::with_witness(&net, firing_a.witness.clone()).expect("consistent");
    let proof = system.prove(&circuit).expect("provable");

    // Game B's public inputs describe a different firing; A's proof does
    // not transfer.
    let inputs_b = TransitionCircuit::public_inputs(
        &firing_b.record.pre_root,
        &firing_b.record.post_root,
        capture_b,
    );
    assert!(system
        .verify(&TransitionCircuit::blank(&net), &inputs_b, &proof)
        .is_err());
}
