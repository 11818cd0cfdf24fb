// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Workspace-level specs driving the compiled `redock` binary.

mod prelude {
    use assert_cmd::Command;

    /// A `redock` invocation with a scrubbed environment, so specs
    /// never pick up deployment variables from the developer's shell.
    pub fn cli() -> Cmd {
        let mut inner = Command::cargo_bin("redock").expect("redock binary");
        inner.env_clear();
        Cmd { inner }
    }

    pub struct Cmd {
        inner: Command,
    }

    impl Cmd {
        pub fn args(mut self, args: &[&str]) -> Self {
            self.inner.args(args);
            self
        }

        pub fn env(mut self, key: &str, value: &str) -> Self {
            self.inner.env(key, value);
            self
        }

        pub fn passes(mut self) -> Run {
            let output = self.run();
            assert!(output.status.success(), "expected success: {output:?}");
            Run { output }
        }

        pub fn fails(mut self) -> Run {
            let output = self.run();
            assert!(!output.status.success(), "expected failure: {output:?}");
            Run { output }
        }

        fn run(&mut self) -> std::process::Output {
            self.inner.output().expect("spawn redock")
        }
    }

    pub struct Run {
        output: std::process::Output,
    }

    impl Run {
        pub fn stdout_has(self, needle: &str) -> Self {
            let stdout = String::from_utf8_lossy(&self.output.stdout);
            assert!(stdout.contains(needle), "stdout missing {needle:?}:\n{stdout}");
            self
        }

        pub fn stderr_has(self, needle: &str) -> Self {
            let stderr = String::from_utf8_lossy(&self.output.stderr);
            assert!(stderr.contains(needle), "stderr missing {needle:?}:\n{stderr}");
            self
        }
    }
}

mod specs {
    mod cli {
        mod fail_closed;
        mod help;
    }
}
