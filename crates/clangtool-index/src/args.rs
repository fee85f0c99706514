/// The compiler invocation applied to every parse.
///
/// Arguments are replaced wholesale. Each effective replacement bumps
/// `generation`, which cached entries compare against to tell whether they
/// were parsed under the current arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentStore {
    args: Vec<String>,
    generation: u64,
}

impl ArgumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the stored arguments. Setting identical arguments is a no-op.
    pub fn set(&mut self, args: Vec<String>) {
        if args == self.args {
            return;
        }
        self.args = args;
        self.generation += 1;
        tracing::debug!(
            target: "clangtool.index",
            generation = self.generation,
            count = self.args.len(),
            "compiler arguments replaced"
        );
    }

    pub fn get(&self) -> &[String] {
        &self.args
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
