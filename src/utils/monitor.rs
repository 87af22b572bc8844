use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

#[derive(Debug, Clone)]
pub struct ProcessStats {
    pub cpu_usage: f32,
    pub memory_usage_mb: u64,
    pub elapsed_time: Duration,
}

/// 量測從啟動到顯示完成的時間，啟用時順便抓 process 的 CPU / 記憶體。
pub struct LoadMonitor {
    start_time: Instant,
    enabled: bool,
    #[cfg(feature = "cli")]
    system: Option<(System, Pid)>,
}

impl LoadMonitor {
    pub fn new(enabled: bool) -> Self {
        Self {
            start_time: Instant::now(),
            enabled,
            #[cfg(feature = "cli")]
            system: if enabled { primed_system() } else { None },
        }
    }

    /// Turns stats collection on without resetting the start time.
    pub fn enable(&mut self) {
        if self.enabled {
            return;
        }
        self.enabled = true;
        #[cfg(feature = "cli")]
        {
            self.system = primed_system();
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[cfg(feature = "cli")]
    pub fn stats(&mut self) -> Option<ProcessStats> {
        if !self.enabled {
            return None;
        }

        let elapsed_time = self.start_time.elapsed();
        let (system, pid) = self.system.as_mut()?;
        refresh_process(system, *pid);
        let process = system.process(*pid)?;

        Some(ProcessStats {
            cpu_usage: process.cpu_usage(),
            memory_usage_mb: process.memory() / 1024 / 1024,
            elapsed_time,
        })
    }

    #[cfg(not(feature = "cli"))]
    pub fn stats(&mut self) -> Option<ProcessStats> {
        None
    }

    pub fn log_final_stats(&mut self) {
        if let Some(stats) = self.stats() {
            tracing::info!(
                "📊 Final Stats - CPU: {:.1}%, Memory: {}MB, Time: {:?}",
                stats.cpu_usage,
                stats.memory_usage_mb,
                stats.elapsed_time
            );
        }
    }
}

#[cfg(feature = "cli")]
fn refresh_process(system: &mut System, pid: Pid) {
    system.refresh_processes_specifics(
        ProcessesToUpdate::Some(&[pid]),
        true,
        ProcessRefreshKind::nothing().with_cpu().with_memory(),
    );
}

/// CPU 使用率是兩次刷新之間的差值，所以建立時先刷新一次當基準。
#[cfg(feature = "cli")]
fn primed_system() -> Option<(System, Pid)> {
    let pid = sysinfo::get_current_pid().ok()?;
    let mut system = System::new();
    refresh_process(&mut system, pid);
    Some((system, pid))
}

impl Default for LoadMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}
