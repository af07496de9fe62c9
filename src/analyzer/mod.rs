//! This module contains the definition of the analyzer itself.

pub mod state;

use crate::{
    abi,
    abi::AbiRecord,
    analyzer::state::State,
    bytecode::Bytecode,
    disassembly::scanner::Scanner,
    program::Program,
};

/// Creates a new analyzer wrapping the provided `bytecode`.
#[must_use]
pub fn new(bytecode: Bytecode) -> Analyzer<state::HasBytecode> {
    let state = state::HasBytecode;
    Analyzer { bytecode, state }
}

/// The core of the ABI reconstruction, the `Analyzer` is responsible for
/// ingesting raw bytecode and outputting a list of ABI records.
///
/// # Enforcing Valid State Transitions
///
/// The analyzer enforces that only correct state transitions can occur
/// through use of structs that implement the exact state required by it at
/// any given point. The [`Self::state`] function provides access to the
/// state data of whichever state it is in.
///
/// # Infallibility
///
/// Once the analyzer holds decoded bytes nothing in the pipeline can fail:
/// a byte sequence that is not a well-formed program simply produces an
/// empty or sparse result.
#[derive(Clone, Debug)]
pub struct Analyzer<S: State> {
    /// The bytecode that is being analyzed.
    bytecode: Bytecode,

    /// The internal state of the analyzer.
    state: S,
}

/// Operations available in all states.
impl<S: State> Analyzer<S> {
    /// Gets a reference to the bytecode being analyzed.
    pub fn bytecode(&self) -> &Bytecode {
        &self.bytecode
    }

    /// Gets a reference to the current state of the analyzer.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Transitions the analyzer into `new_state`.
    ///
    /// This is kept private so that the only reachable state sequences are
    /// the ones exposed through the typed transition methods.
    fn set_state<NS: State>(self, new_state: NS) -> Analyzer<NS> {
        Analyzer {
            bytecode: self.bytecode,
            state:    new_state,
        }
    }

    /// Transitions the analyzer into the state created by applying
    /// `transform` to its current state.
    fn transform_state<NS: State>(self, transform: impl FnOnce(S) -> NS) -> Analyzer<NS> {
        let state = transform(self.state);
        let bytecode = self.bytecode;

        Analyzer { bytecode, state }
    }
}

/// Operations available on a newly-created analyzer.
impl Analyzer<state::HasBytecode> {
    /// Executes the analysis process from beginning to end, performing all
    /// the intermediate steps automatically and returning the reconstructed
    /// ABI records.
    #[must_use]
    pub fn analyze(self) -> Vec<AbiRecord> {
        self.scan().synthesize().into_records()
    }

    /// Performs the single scanning pass over the bytecode, producing the
    /// program summary.
    #[must_use]
    pub fn scan(self) -> Analyzer<state::ScanComplete> {
        let program = Scanner::new(self.bytecode.as_bytes()).scan();
        self.set_state(state::ScanComplete { program })
    }
}

/// Operations available on an analyzer that has completed its scan.
impl Analyzer<state::ScanComplete> {
    /// Gets a reference to the scanned program summary.
    pub fn program(&self) -> &Program {
        &self.state.program
    }

    /// Consumes the analyzer, returning the scanned program summary.
    #[must_use]
    pub fn into_program(self) -> Program {
        self.state.program
    }

    /// Synthesizes the ABI records from the scanned program.
    #[must_use]
    pub fn synthesize(self) -> Analyzer<state::Complete> {
        self.transform_state(|old_state| {
            let records = abi::synthesize(&old_state.program);
            state::Complete {
                program: old_state.program,
                records,
            }
        })
    }
}

/// Operations available on an analyzer that has synthesized its ABI.
impl Analyzer<state::Complete> {
    /// Gets a reference to the scanned program summary.
    pub fn program(&self) -> &Program {
        &self.state.program
    }

    /// Gets a reference to the reconstructed ABI records.
    pub fn records(&self) -> &[AbiRecord] {
        self.state.records.as_slice()
    }

    /// Consumes the analyzer, returning the reconstructed ABI records.
    #[must_use]
    pub fn into_records(self) -> Vec<AbiRecord> {
        self.state.records
    }
}

#[cfg(test)]
mod test {
    use crate::{analyzer, bytecode::Bytecode};

    #[test]
    fn runs_the_staged_pipeline() {
        // JUMPDEST CALLVALUE RETURN
        let bytecode = Bytecode::try_from("0x5b34f3").expect("Decoding errored");

        let scanned = analyzer::new(bytecode).scan();
        assert_eq!(scanned.program().dests.len(), 1);

        let complete = scanned.synthesize();
        assert!(complete.records().is_empty());
    }

    #[test]
    fn analyze_matches_the_staged_pipeline() {
        let bytecode = Bytecode::try_from("0x6318160ddd14600a57005b6020f3").unwrap();

        let staged = analyzer::new(bytecode.clone()).scan().synthesize().into_records();
        let direct = analyzer::new(bytecode).analyze();

        assert_eq!(staged, direct);
    }
}
