/*!
The two phase registration protocol.

Namespaces move `Unregistered → Preordered → Revealed → Ready` through
`namespace-preorder`, `namespace-reveal` and `namespace-ready`. Names move
`Unregistered → Preordered → Registered` through `name-preorder` and
`name-register`, where the registration reveals the name and salt in the same
transaction. The contract verifies commitments; this only tracks which
transaction may come next.
*/
use strum::{Display, EnumIter};
use tracing::debug;

use crate::{BnsError, BnsResult};

/// What is being registered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum RegistrationKind {
	/// A namespace
	Namespace,
	/// A name within a namespace
	Name,
}

/// Where a registration stands.
///
/// [RegistrationPhase::Revealed] and [RegistrationPhase::Ready] apply only to
/// namespaces. A name goes from [RegistrationPhase::Preordered] straight to
/// [RegistrationPhase::Registered] because `name-register` reveals the name
/// and claims it in one transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum RegistrationPhase {
	/// Nothing submitted yet
	#[default]
	Unregistered,
	/// The commitment is on-chain
	Preordered,
	/// The namespace and its pricing are public. Never reached by names.
	Revealed,
	/// The namespace accepts registrations
	Ready,
	/// The name is owned
	Registered,
}

impl RegistrationPhase {
	/// Whether no further registration step applies
	pub fn is_terminal(&self) -> bool {
		matches!(self, Self::Ready | Self::Registered)
	}
}

/// A transaction that moves a registration forward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum RegistrationStep {
	/// Commit to the salted identifier
	Preorder,
	/// Disclose a namespace
	Reveal,
	/// Launch a namespace
	Ready,
	/// Disclose and claim a name
	Register,
}

/// Registration of a namespace or a name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registration {
	kind: RegistrationKind,
	phase: RegistrationPhase,
}

impl Registration {
	/// A registration that has not started
	pub fn new(kind: RegistrationKind) -> Self {
		Self {
			kind,
			phase: RegistrationPhase::Unregistered,
		}
	}

	/// What is being registered
	pub fn kind(&self) -> RegistrationKind {
		self.kind
	}

	/// Current phase
	pub fn phase(&self) -> RegistrationPhase {
		self.phase
	}

	/// The step that may be submitted next, none once terminal
	pub fn next_step(&self) -> Option<RegistrationStep> {
		use RegistrationKind as Kind;
		use RegistrationPhase as Phase;

		match (self.kind, self.phase) {
			(_, Phase::Unregistered) => Some(RegistrationStep::Preorder),
			(Kind::Namespace, Phase::Preordered) => Some(RegistrationStep::Reveal),
			(Kind::Namespace, Phase::Revealed) => Some(RegistrationStep::Ready),
			(Kind::Name, Phase::Preordered) => Some(RegistrationStep::Register),
			_ => None,
		}
	}

	/// Registry function submitting `step` for this kind of registration
	pub fn function_name(&self, step: RegistrationStep) -> BnsResult<&'static str> {
		use RegistrationKind as Kind;
		use RegistrationStep as Step;

		match (self.kind, step) {
			(Kind::Namespace, Step::Preorder) => Ok("namespace-preorder"),
			(Kind::Namespace, Step::Reveal) => Ok("namespace-reveal"),
			(Kind::Namespace, Step::Ready) => Ok("namespace-ready"),
			(Kind::Name, Step::Preorder) => Ok("name-preorder"),
			(Kind::Name, Step::Register) => Ok("name-register"),
			(kind, step) => Err(BnsError::Validation(format!(
				"A {kind} has no {step} step"
			))),
		}
	}

	/// Applies a step, failing if it is not the one the protocol expects
	pub fn advance(&mut self, step: RegistrationStep) -> BnsResult<RegistrationPhase> {
		if self.next_step() != Some(step) {
			return Err(BnsError::Validation(format!(
				"Cannot {step} a {} that is {}",
				self.kind, self.phase
			)));
		}

		let phase = match step {
			RegistrationStep::Preorder => RegistrationPhase::Preordered,
			RegistrationStep::Reveal => RegistrationPhase::Revealed,
			RegistrationStep::Ready => RegistrationPhase::Ready,
			RegistrationStep::Register => RegistrationPhase::Registered,
		};

		debug!(kind = %self.kind, from = %self.phase, to = %phase, "Registration advanced");
		self.phase = phase;

		Ok(phase)
	}
}

#[cfg(test)]
mod tests {
	use strum::IntoEnumIterator;

	use super::*;

	#[test]
	fn should_walk_namespace_registration() {
		let mut registration = Registration::new(RegistrationKind::Namespace);

		assert_eq!(
			registration.advance(RegistrationStep::Preorder).unwrap(),
			RegistrationPhase::Preordered
		);
		assert_eq!(
			registration.advance(RegistrationStep::Reveal).unwrap(),
			RegistrationPhase::Revealed
		);
		assert_eq!(
			registration.advance(RegistrationStep::Ready).unwrap(),
			RegistrationPhase::Ready
		);
		assert!(registration.phase().is_terminal());
		assert_eq!(registration.next_step(), None);
	}

	#[test]
	fn should_walk_name_registration() {
		let mut registration = Registration::new(RegistrationKind::Name);

		registration.advance(RegistrationStep::Preorder).unwrap();

		assert_eq!(registration.next_step(), Some(RegistrationStep::Register));
		assert_eq!(
			registration.advance(RegistrationStep::Register).unwrap(),
			RegistrationPhase::Registered
		);
		assert!(registration.phase().is_terminal());
	}

	#[test]
	fn should_never_reveal_names() {
		let mut registration = Registration::new(RegistrationKind::Name);

		for step in [RegistrationStep::Preorder, RegistrationStep::Register] {
			let phase = registration.advance(step).unwrap();

			assert_ne!(phase, RegistrationPhase::Revealed);
			assert_ne!(phase, RegistrationPhase::Ready);
		}

		let mut name = Registration::new(RegistrationKind::Name);
		name.advance(RegistrationStep::Preorder).unwrap();

		assert!(name.advance(RegistrationStep::Reveal).is_err());
		assert_eq!(name.phase(), RegistrationPhase::Preordered);
	}

	#[test]
	fn should_reject_out_of_order_steps() {
		let mut registration = Registration::new(RegistrationKind::Namespace);

		assert!(matches!(
			registration.advance(RegistrationStep::Reveal),
			Err(BnsError::Validation(_))
		));
		assert_eq!(registration.phase(), RegistrationPhase::Unregistered);

		registration.advance(RegistrationStep::Preorder).unwrap();

		assert!(registration.advance(RegistrationStep::Preorder).is_err());
		assert!(registration.advance(RegistrationStep::Register).is_err());
		assert_eq!(registration.phase(), RegistrationPhase::Preordered);
	}

	#[test]
	fn should_never_advance_terminal_registrations() {
		let mut name = Registration::new(RegistrationKind::Name);
		name.advance(RegistrationStep::Preorder).unwrap();
		name.advance(RegistrationStep::Register).unwrap();

		for step in RegistrationStep::iter() {
			assert!(name.advance(step).is_err());
		}
	}

	#[test]
	fn should_map_steps_to_registry_functions() {
		let namespace = Registration::new(RegistrationKind::Namespace);
		let name = Registration::new(RegistrationKind::Name);

		assert_eq!(
			namespace.function_name(RegistrationStep::Reveal).unwrap(),
			"namespace-reveal"
		);
		assert_eq!(
			name.function_name(RegistrationStep::Register).unwrap(),
			"name-register"
		);
		assert!(name.function_name(RegistrationStep::Ready).is_err());
	}
}
