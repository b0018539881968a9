use crate::docker::Executor;
use crate::error::DockerError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

// MockDocker implements Executor for tests.
// Responses are keyed by the space-joined args, e.g. "ps --format {{json .}}".
#[derive(Default)]
pub struct MockDocker {
    calls: Mutex<Vec<Vec<String>>>,
    results: HashMap<String, Result<String, String>>,
}

impl MockDocker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&mut self, args: &str, output: &str) {
        self.results.insert(args.to_string(), Ok(output.to_string()));
    }

    pub fn on_error(&mut self, args: &str, message: &str) {
        self.results
            .insert(args.to_string(), Err(message.to_string()));
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    fn respond(&self, args: &[String]) -> Result<String, DockerError> {
        self.calls.lock().unwrap().push(args.to_vec());
        let key = args.join(" ");
        let subcommand = args.first().cloned().unwrap_or_default();
        match self.results.get(&key) {
            Some(Ok(output)) => Ok(output.clone()),
            Some(Err(message)) => Err(DockerError::Failed {
                subcommand,
                status: "exit status: 1".to_string(),
                output: message.clone(),
            }),
            None => Err(DockerError::Failed {
                subcommand,
                status: "unexpected command".to_string(),
                output: format!("docker {key}"),
            }),
        }
    }
}

#[async_trait]
impl Executor for MockDocker {
    async fn exec(&self, args: &[String]) -> Result<String, DockerError> {
        self.respond(args)
    }

    async fn exec_combined(&self, args: &[String]) -> Result<String, DockerError> {
        self.respond(args)
    }
}
