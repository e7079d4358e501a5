//! Host description written next to the measurements.

use std::fmt;
use std::io;
use std::path::Path;

use tokio::fs;

const UNKNOWN: &str = "unknown";

/// CPU, memory and operating system of the measuring host.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemInfo {
    pub cpu_model: String,
    pub cores: usize,
    /// Total memory in GiB, if it could be determined.
    pub memory_gib: Option<f64>,
    pub os: String,
    pub kernel: String,
}

impl SystemInfo {
    /// Gather information about the current host.
    ///
    /// CPU model, memory and kernel release come from `/proc` and are
    /// reported as unknown where it is unavailable.
    pub async fn collect() -> Self {
        let cpu_model = read_proc("/proc/cpuinfo")
            .await
            .and_then(|text| parse_cpu_model(&text));
        let memory_gib = read_proc("/proc/meminfo")
            .await
            .and_then(|text| parse_mem_total_kib(&text))
            .map(|kib| kib as f64 / (1024.0 * 1024.0));
        let kernel = read_proc("/proc/sys/kernel/osrelease")
            .await
            .map(|text| text.trim().to_string())
            .filter(|release| !release.is_empty());

        Self {
            cpu_model: cpu_model.unwrap_or_else(|| UNKNOWN.to_string()),
            cores: std::thread::available_parallelism().map_or(1, |n| n.get()),
            memory_gib,
            os: std::env::consts::OS.to_string(),
            kernel: kernel.unwrap_or_else(|| UNKNOWN.to_string()),
        }
    }
}

impl fmt::Display for SystemInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let memory = match self.memory_gib {
            Some(gib) => format!("{gib:.1} GiB"),
            None => UNKNOWN.to_string(),
        };
        writeln!(
            f,
            "CPU: {}, Cores: {}, RAM: {}",
            self.cpu_model, self.cores, memory
        )?;
        writeln!(f, "OS: {}, Kernel: {}", self.os, self.kernel)
    }
}

/// Collect host information and write it to `path`.
pub async fn write_system_info(path: &Path) -> io::Result<SystemInfo> {
    let info = SystemInfo::collect().await;
    fs::write(path, info.to_string()).await?;
    Ok(info)
}

async fn read_proc(path: &str) -> Option<String> {
    fs::read_to_string(path).await.ok()
}

fn parse_cpu_model(cpuinfo: &str) -> Option<String> {
    cpuinfo.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        (key.trim() == "model name").then(|| value.trim().to_string())
    })
}

fn parse_mem_total_kib(meminfo: &str) -> Option<u64> {
    meminfo.lines().find_map(|line| {
        let rest = line.strip_prefix("MemTotal:")?;
        rest.split_whitespace().next()?.parse().ok()
    })
}
