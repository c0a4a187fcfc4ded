//! # Engine Argument Lists (`common::engine::args`)
//!
//! File: cli/src/common/engine/args.rs
//!
//! One pure function per action, each returning the exact argument vector
//! handed to the engine binary. Nothing here validates input; callers pass
//! values that already went through `common::validate`.
//!

/// Column layout for `images`.
pub const IMAGES_FORMAT: &str =
    "table {{.Repository}}\t{{.Tag}}\t{{.ID}}\t{{.Size}}\t{{.CreatedSince}}";

/// Column layout for `ps`.
pub const PS_FORMAT: &str = "table {{.ID}}\t{{.Names}}\t{{.Image}}\t{{.Status}}\t{{.Ports}}";

fn owned<const N: usize>(args: [&str; N]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

/// `--version`, used as the startup availability probe.
pub fn version() -> Vec<String> {
    owned(["--version"])
}

/// `images` with the fixed column layout of `IMAGES_FORMAT`.
pub fn list_images() -> Vec<String> {
    owned(["images", "--format", IMAGES_FORMAT])
}

/// `pull <image>`.
pub fn pull_image(image: &str) -> Vec<String> {
    owned(["pull", image])
}

/// `build -t <tag> <context>`.
///
/// # Arguments
///
/// * `tag` - Name (and optional `:tag`) given to the built image.
/// * `context` - Directory sent to the engine as the build context. It must
///   already contain a `Dockerfile`.
pub fn build_image(tag: &str, context: &str) -> Vec<String> {
    owned(["build", "-t", tag, context])
}

/// `rmi [-f] <image>`.
pub fn remove_image(image: &str, force: bool) -> Vec<String> {
    if force {
        owned(["rmi", "-f", image])
    } else {
        owned(["rmi", image])
    }
}

/// `ps [-a]` with the column layout of `PS_FORMAT`. `-a` includes stopped
/// containers.
pub fn list_containers(all: bool) -> Vec<String> {
    let mut args = owned(["ps", "--format", PS_FORMAT]);
    if all {
        args.insert(1, "-a".to_string());
    }
    args
}

/// Parameters for `run -d`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSpec {
    pub image: String,
    pub name: Option<String>,
    pub ports: Vec<String>,
}

/// `run -d [--name <name>] [-p <mapping>]... <image>`.
///
/// Options always come before the image, since anything after it would be
/// passed to the container's entrypoint.
pub fn run_container(spec: &RunSpec) -> Vec<String> {
    let mut args = owned(["run", "-d"]);
    if let Some(name) = &spec.name {
        args.extend(owned(["--name", name]));
    }
    for port in &spec.ports {
        args.extend(owned(["-p", port]));
    }
    args.push(spec.image.clone());
    args
}

/// `start <id>`.
pub fn start_container(id: &str) -> Vec<String> {
    owned(["start", id])
}

/// `stop <id>`.
pub fn stop_container(id: &str) -> Vec<String> {
    owned(["stop", id])
}

/// `restart <id>`.
pub fn restart_container(id: &str) -> Vec<String> {
    owned(["restart", id])
}

/// `rm [-f] <id>`. With `force` a running container is stopped first.
pub fn remove_container(id: &str, force: bool) -> Vec<String> {
    if force {
        owned(["rm", "-f", id])
    } else {
        owned(["rm", id])
    }
}

/// `logs --tail <n> [-f] <id>`.
///
/// # Arguments
///
/// * `id` - Container ID or name.
/// * `tail` - Number of trailing lines to print.
/// * `follow` - Keep streaming until interrupted.
pub fn container_logs(id: &str, tail: u32, follow: bool) -> Vec<String> {
    let mut args = owned(["logs", "--tail", &tail.to_string()]);
    if follow {
        args.push("-f".to_string());
    }
    args.push(id.to_string());
    args
}

/// `exec -it <id> <shell>`: an interactive shell attached to the terminal.
pub fn exec_shell(id: &str, shell: &str) -> Vec<String> {
    owned(["exec", "-it", id, shell])
}

pub fn system_info() -> Vec<String> {
    owned(["system", "info"])
}

pub fn disk_usage() -> Vec<String> {
    owned(["system", "df"])
}

/// `system prune -a -f`: removes every unused resource without asking.
pub fn system_prune() -> Vec<String> {
    owned(["system", "prune", "-a", "-f"])
}
