//! Host integration tests for the Noise handshake engine: a full XX
//! handshake between two independently-driven state machines, followed by
//! bidirectional transport traffic, plus a static-key-mismatch rejection
//! case.

use rand_core::OsRng;
use sweetweave::curve25519::x25519::X25519KeyPair;
use sweetweave::noise::cipher_state::NoiseCipherAlgorithm;
use sweetweave::noise::handshake_state::{HandshakeState, Role};
use sweetweave::noise::patterns;
use sweetweave::noise::symmetric_state::NoiseHashAlgorithm;

#[test]
fn xx_handshake_then_transport_round_trip() -> anyhow::Result<()> {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let mut rng = OsRng;
    let pattern = patterns::by_name("XX").unwrap();

    let initiator_static = X25519KeyPair::generate(&mut rng);
    let responder_static = X25519KeyPair::generate(&mut rng);

    let mut initiator =
        HandshakeState::initialize(Role::Initiator, pattern, NoiseCipherAlgorithm::ChaCha20Poly1305, NoiseHashAlgorithm::Blake2s, Some(initiator_static), None)?;
    let mut responder =
        HandshakeState::initialize(Role::Responder, pattern, NoiseCipherAlgorithm::ChaCha20Poly1305, NoiseHashAlgorithm::Blake2s, Some(responder_static), None)?;

    let msg1 = initiator.write_message(b"", &mut rng)?;
    responder.read_message(&msg1)?;

    let msg2 = responder.write_message(b"", &mut rng)?;
    initiator.read_message(&msg2)?;

    let msg3 = initiator.write_message(b"", &mut rng)?;
    responder.read_message(&msg3)?;

    assert!(initiator.is_complete());
    assert!(responder.is_complete());

    let (mut initiator_send, mut initiator_recv) = initiator.split()?;
    let (mut responder_send, mut responder_recv) = responder.split()?;

    let mut ping = b"PING".to_vec();
    initiator_send.encrypt_with_ad(b"", &mut ping)?;
    responder_recv.decrypt_with_ad(b"", &mut ping)?;
    assert_eq!(ping, b"PING".to_vec());

    let mut pong = b"PONG".to_vec();
    responder_send.encrypt_with_ad(b"", &mut pong)?;
    initiator_recv.decrypt_with_ad(b"", &mut pong)?;
    assert_eq!(pong, b"PONG".to_vec());

    Ok(())
}

#[test]
fn xx_handshake_rejects_unexpected_remote_static_key() {
    let mut rng = OsRng;
    let pattern = patterns::by_name("XX").unwrap();

    let initiator_static = X25519KeyPair::generate(&mut rng);
    let responder_static = X25519KeyPair::generate(&mut rng);
    let pinned_wrong_key = X25519KeyPair::generate(&mut rng).public_key();

    let mut initiator =
        HandshakeState::initialize(Role::Initiator, pattern, NoiseCipherAlgorithm::ChaCha20Poly1305, NoiseHashAlgorithm::Blake2s, Some(initiator_static), None)
            .unwrap();
    let mut responder =
        HandshakeState::initialize(Role::Responder, pattern, NoiseCipherAlgorithm::ChaCha20Poly1305, NoiseHashAlgorithm::Blake2s, Some(responder_static), None)
            .unwrap();
    initiator.on_remote_static_key(move |received| received == &pinned_wrong_key);

    let msg1 = initiator.write_message(b"", &mut rng).unwrap();
    responder.read_message(&msg1).unwrap();
    let msg2 = responder.write_message(b"", &mut rng).unwrap();

    let err = initiator.read_message(&msg2).unwrap_err();
    assert_eq!(err, sweetweave::CryptoError::AuthenticationFailure);
}

#[test]
fn truncated_handshake_message_is_rejected() {
    let mut rng = OsRng;
    let pattern = patterns::by_name("NK").unwrap();
    let responder_static = X25519KeyPair::generate(&mut rng);
    let responder_public = responder_static.public_key();

    let mut initiator =
        HandshakeState::initialize(Role::Initiator, pattern, NoiseCipherAlgorithm::AesGcm, NoiseHashAlgorithm::Sha256, None, Some(responder_public)).unwrap();
    let msg1 = initiator.write_message(b"", &mut rng).unwrap();

    let mut responder = HandshakeState::initialize(Role::Responder, pattern, NoiseCipherAlgorithm::AesGcm, NoiseHashAlgorithm::Sha256, Some(responder_static), None).unwrap();
    assert!(responder.read_message(&msg1[..msg1.len() - 1]).is_err());
}
