//! Task table and suspend/resume gates.
//!
//! Every execution unit in the topology is a thread created through
//! [`spawn_on_core`](crate::drivers::task_pin::spawn_on_core), which on
//! ESP-IDF is a FreeRTOS task with its own priority.  Suspension is
//! cooperative: each task passes its [`TaskGate`] at the top of every
//! iteration and blocks there while suspended.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │  Scheduler                                                │
//! │                                                           │
//! │  launch gate ──▶ held until start()                       │
//! │                                                           │
//! │  TaskTable  ┌──────────────┬──────────────┬────────────┐  │
//! │             │ ButtonMonitor│ SwitchMonitor│TimerService│  │
//! │             │   pri 1      │   pri 1      │   pri 2    │  │
//! │             └──────▲───────┴──────┬───────┴────────────┘  │
//! │                    └── suspend / resume (SW0+SW1)         │
//! └───────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread::JoinHandle;

use heapless::Vec;
use log::info;

use crate::app::ports::TaskControl;
use crate::drivers::task_pin::{Core, spawn_on_core};
use crate::error::{Error, Result};

// ═══════════════════════════════════════════════════════════════
//  Task identity
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskId {
    ButtonMonitor,
    SwitchMonitor,
    TimerService,
}

/// Number of execution units in the topology.
pub const TASK_COUNT: usize = 3;

impl TaskId {
    pub const ALL: [Self; TASK_COUNT] = [Self::ButtonMonitor, Self::SwitchMonitor, Self::TimerService];

    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::ButtonMonitor => "BTNtask",
            Self::SwitchMonitor => "SWtask",
            Self::TimerService => "TIMERsvc",
        }
    }

    /// Null-terminated thread name for `esp_pthread_set_cfg`.
    const fn thread_name(self) -> &'static str {
        match self {
            Self::ButtonMonitor => "btn-monitor\0",
            Self::SwitchMonitor => "sw-monitor\0",
            Self::TimerService => "timer-svc\0",
        }
    }

    /// Monitors share the lowest application priority; the timer
    /// service preempts them.
    pub const fn priority(self) -> u8 {
        match self {
            Self::ButtonMonitor | Self::SwitchMonitor => 1,
            Self::TimerService => 2,
        }
    }

    const fn stack_kb(self) -> usize {
        match self {
            Self::ButtonMonitor | Self::SwitchMonitor => 4,
            Self::TimerService => 6,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

// ═══════════════════════════════════════════════════════════════
//  Gates
// ═══════════════════════════════════════════════════════════════

/// Suspension flag for one task.
#[derive(Debug, Default)]
pub struct TaskGate {
    suspended: Mutex<bool>,
    wake: Condvar,
}

impl TaskGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// A gate that starts closed.
    pub fn held() -> Self {
        Self {
            suspended: Mutex::new(true),
            wake: Condvar::new(),
        }
    }

    pub fn suspend(&self) {
        *self.suspended.lock().unwrap_or_else(PoisonError::into_inner) = true;
    }

    pub fn resume(&self) {
        *self.suspended.lock().unwrap_or_else(PoisonError::into_inner) = false;
        self.wake.notify_all();
    }

    pub fn is_suspended(&self) -> bool {
        *self.suspended.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Block the calling task while the gate is closed.
    pub fn checkpoint(&self) {
        let guard = self.suspended.lock().unwrap_or_else(PoisonError::into_inner);
        let _guard = self
            .wake
            .wait_while(guard, |suspended| *suspended)
            .unwrap_or_else(PoisonError::into_inner);
    }
}

/// Shared handle on every task's gate.  Cheap to clone; this is what the
/// switch monitor holds to suspend the button monitor.
#[derive(Debug, Clone)]
pub struct TaskTable {
    gates: [Arc<TaskGate>; TASK_COUNT],
}

impl Default for TaskTable {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskTable {
    pub fn new() -> Self {
        Self {
            gates: core::array::from_fn(|_| Arc::new(TaskGate::new())),
        }
    }

    pub fn gate(&self, task: TaskId) -> Arc<TaskGate> {
        Arc::clone(&self.gates[task.index()])
    }
}

impl TaskControl for TaskTable {
    fn suspend(&self, task: TaskId) {
        self.gates[task.index()].suspend();
    }

    fn resume(&self, task: TaskId) {
        self.gates[task.index()].resume();
    }

    fn is_suspended(&self, task: TaskId) -> bool {
        self.gates[task.index()].is_suspended()
    }
}

// ═══════════════════════════════════════════════════════════════
//  Scheduler
// ═══════════════════════════════════════════════════════════════

pub struct Scheduler {
    tasks: TaskTable,
    launch: Arc<TaskGate>,
    handles: Vec<JoinHandle<()>, TASK_COUNT>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            tasks: TaskTable::new(),
            launch: Arc::new(TaskGate::held()),
            handles: Vec::new(),
        }
    }

    pub fn tasks(&self) -> TaskTable {
        self.tasks.clone()
    }

    /// Create `task`.  It does not run until [`start`](Self::start).
    pub fn spawn<F>(&mut self, task: TaskId, body: F) -> Result<()>
    where
        F: FnOnce(&TaskGate) + Send + 'static,
    {
        let gate = self.tasks.gate(task);
        let launch = Arc::clone(&self.launch);
        let handle = spawn_on_core(Core::App, task.priority(), task.stack_kb(), task.thread_name(), move || {
            launch.checkpoint();
            body(gate.as_ref());
        })
        .map_err(|_| Error::Spawn(task.name()))?;

        self.handles.push(handle).map_err(|_| Error::Spawn(task.name()))?;
        info!("scheduler: {} created (pri={})", task.name(), task.priority());
        Ok(())
    }

    /// Release every created task.
    pub fn start(&self) {
        info!("scheduler: starting {} tasks", self.handles.len());
        self.launch.resume();
    }

    pub fn is_started(&self) -> bool {
        !self.launch.is_suspended()
    }

    /// Block until every task returns.  Tasks loop forever, so on the
    /// board this never comes back.
    pub fn join(self) {
        for handle in self.handles {
            if handle.join().is_err() {
                log::error!("scheduler: a task panicked");
            }
        }
    }
}
