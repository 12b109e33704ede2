use crate::task::Task;

/// Tasks in arrival order. Entries are only ever appended.
#[derive(Debug, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
    pub selected: usize,
}

impl TaskList {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            selected: 0,
        }
    }

    /// Seeds the list with what the service already holds.
    ///
    /// Tasks appended before the snapshot arrived stay at the end unless
    /// the snapshot already carries their id.
    pub fn load(&mut self, tasks: Vec<Task>) {
        let earlier = std::mem::replace(&mut self.tasks, tasks);
        for task in earlier {
            if !self.tasks.iter().any(|t| t.id == task.id) {
                self.tasks.push(task);
            }
        }
        self.selected = 0;
    }

    pub fn push(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.tasks.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}
