use crate::docker::Executor;
use crate::error::{Result, ToolError};
use crate::tools::{cmd, non_empty, require};
use rmcp::schemars;
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct ContainerInspectArgs {
    /// Container name or ID to inspect
    pub container: String,
    /// Section to display: env, ports, volumes, network or all (default: all)
    #[serde(default)]
    pub section: Option<String>,
}

pub async fn handle(exec: &dyn Executor, args: ContainerInspectArgs) -> Result<String> {
    require(&args.container, "container name or ID is required")?;
    let section = non_empty(&args.section).unwrap_or("all");

    let output = exec
        .exec(&cmd(&["inspect", &args.container]))
        .await
        .map_err(|e| ToolError::docker("failed to inspect container", e))?;

    // docker inspect prints a JSON array with one object per argument
    let parsed: Value =
        serde_json::from_str(&output).map_err(|e| ToolError::parse("inspect JSON", e))?;
    let data = parsed
        .as_array()
        .and_then(|items| items.first())
        .and_then(Value::as_object)
        .ok_or_else(|| {
            ToolError::NotFound(format!(
                "no inspect data returned for container {}",
                args.container
            ))
        })?;

    match section {
        "env" => Ok(format_env(data)),
        "ports" => Ok(format_ports(data)),
        "volumes" => Ok(format_volumes(data)),
        "network" => Ok(format_network(data)),
        "all" => Ok(serde_json::to_string_pretty(&parsed).unwrap_or(output)),
        other => Err(ToolError::InvalidArgument(format!(
            "unknown section {other:?}: must be one of env, ports, volumes, network, all"
        ))),
    }
}

fn nested<'a>(data: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Map<String, Value>> {
    keys.iter()
        .try_fold(data, |current, key| current.get(*key)?.as_object())
}

fn str_field<'a>(obj: &'a Map<String, Value>, key: &str) -> &'a str {
    obj.get(key).and_then(Value::as_str).unwrap_or("")
}

fn format_env(data: &Map<String, Value>) -> String {
    let Some(config) = nested(data, &["Config"]) else {
        return "No Config section found.".to_string();
    };
    let Some(env) = config.get("Env").and_then(Value::as_array) else {
        return "No environment variables configured.".to_string();
    };

    let mut out = String::from("Environment Variables:\n");
    for var in env.iter().filter_map(Value::as_str) {
        out.push_str(&format!("  {var}\n"));
    }
    out
}

// Writes "  <port> -> <ip>:<port>" for each binding in a list
fn write_bindings(out: &mut String, port: &str, bindings: &[Value]) {
    for binding in bindings.iter().filter_map(Value::as_object) {
        let host_ip = match str_field(binding, "HostIp") {
            "" => "0.0.0.0",
            ip => ip,
        };
        out.push_str(&format!(
            "  {port} -> {host_ip}:{}\n",
            str_field(binding, "HostPort"),
        ));
    }
}

fn format_ports(data: &Map<String, Value>) -> String {
    let mut out = String::from("Port Bindings:\n");

    if let Some(host_config) = nested(data, &["HostConfig"]) {
        match host_config.get("PortBindings").and_then(Value::as_object) {
            Some(bindings) if !bindings.is_empty() => {
                for (port, list) in bindings {
                    if let Some(list) = list.as_array() {
                        write_bindings(&mut out, port, list);
                    }
                }
            }
            _ => out.push_str("  No port bindings configured.\n"),
        }
    }

    if let Some(ports) = nested(data, &["NetworkSettings", "Ports"]) {
        if !ports.is_empty() {
            out.push_str("\nExposed Ports:\n");
            for (port, mappings) in ports {
                match mappings {
                    Value::Null => {
                        out.push_str(&format!("  {port} -> (not mapped)\n"));
                    }
                    Value::Array(list) => write_bindings(&mut out, port, list),
                    _ => {}
                }
            }
        }
    }

    out
}

fn format_volumes(data: &Map<String, Value>) -> String {
    let mounts = match data.get("Mounts").and_then(Value::as_array) {
        Some(mounts) if !mounts.is_empty() => mounts,
        _ => return "No volumes mounted.".to_string(),
    };

    let mut out = String::from("Mounts:\n");
    for mount in mounts.iter().filter_map(Value::as_object) {
        let rw = mount.get("RW").and_then(Value::as_bool).unwrap_or(false);
        out.push_str(&format!(
            "  [{}] {} -> {} ({})\n",
            str_field(mount, "Type"),
            str_field(mount, "Source"),
            str_field(mount, "Destination"),
            if rw { "rw" } else { "ro" },
        ));
    }
    out
}

fn format_network(data: &Map<String, Value>) -> String {
    let Some(settings) = nested(data, &["NetworkSettings"]) else {
        return "No network settings found.".to_string();
    };
    let networks = match settings.get("Networks").and_then(Value::as_object) {
        Some(networks) if !networks.is_empty() => networks,
        _ => return "No networks configured.".to_string(),
    };

    let mut out = String::from("Networks:\n");
    for (name, net) in networks {
        out.push_str(&format!("  {name}:\n"));
        let Some(net) = net.as_object() else {
            continue;
        };
        for (key, label) in [
            ("IPAddress", "IP Address:"),
            ("Gateway", "Gateway:   "),
            ("MacAddress", "MAC:       "),
        ] {
            let value = str_field(net, key);
            if !value.is_empty() {
                out.push_str(&format!("    {label} {value}\n"));
            }
        }
    }
    out
}
