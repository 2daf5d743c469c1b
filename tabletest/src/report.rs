//! Indented OK/FAILED reporting of test steps.
use color_eyre::eyre::{bail, Result};

#[derive(Default)]
pub struct Report {
    indent: usize,
    checks: usize,
}

impl Report {
    /// Announces a single test step, the outcome is printed on the same line by [`check`].
    ///
    /// [`check`]: Self::check
    pub fn test(&self, msg: &str) {
        print!("{:indent$}{msg}: ", "", indent = self.indent);
    }

    /// Announces a group of test steps.
    pub fn comprehensive(&self, msg: &str) {
        println!("{:indent$}{msg}...", "", indent = self.indent);
    }

    /// Prints the outcome of the last announced step, failing on `false`.
    pub fn check(&mut self, success: bool) -> Result<()> {
        self.checks += 1;
        if success {
            println!("OK");
            Ok(())
        } else {
            println!("FAILED");
            bail!("check #{} failed", self.checks)
        }
    }

    /// Fails with `message` on `false` without printing anything on success.
    pub fn silent_check(&mut self, success: bool, message: &str) -> Result<()> {
        self.checks += 1;
        if !success {
            println!("FAILED {message}");
            bail!("check #{} failed: {message}", self.checks)
        }
        Ok(())
    }

    /// Runs `body` with the output indented one level deeper.
    pub fn indented<R>(&mut self, body: impl FnOnce(&mut Self) -> R) -> R {
        self.indent += 2;
        let result = body(self);
        self.indent -= 2;
        result
    }

    pub fn checks(&self) -> usize {
        self.checks
    }
}
