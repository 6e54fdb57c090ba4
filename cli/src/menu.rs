use std::io::{BufRead, Write};
use std::ops::ControlFlow;

use anyhow::Result;
use prioritask_core::{Completion, TaskError, TaskRepository, TaskService};

use crate::chart::ChartRenderer;
use crate::view::task_line;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddTask,
    ViewTasks,
    CompleteTask,
    VisualizeTasks,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 5] = [
        MenuChoice::AddTask,
        MenuChoice::ViewTasks,
        MenuChoice::CompleteTask,
        MenuChoice::VisualizeTasks,
        MenuChoice::Exit,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            MenuChoice::AddTask => "1",
            MenuChoice::ViewTasks => "2",
            MenuChoice::CompleteTask => "3",
            MenuChoice::VisualizeTasks => "4",
            MenuChoice::Exit => "5",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::AddTask => "Add Task",
            MenuChoice::ViewTasks => "View Tasks",
            MenuChoice::CompleteTask => "Complete Task",
            MenuChoice::VisualizeTasks => "Visualize Tasks",
            MenuChoice::Exit => "Exit",
        }
    }

    pub fn from_input(input: &str) -> Option<Self> {
        let input = input.trim();
        Self::ALL.into_iter().find(|c| c.key() == input)
    }
}

/// Interactive session over any line-based input and output.
pub struct Menu<'a, R: TaskRepository, I, O, C> {
    service: &'a TaskService<R>,
    input: I,
    output: O,
    chart: C,
}

impl<'a, R, I, O, C> Menu<'a, R, I, O, C>
where
    R: TaskRepository,
    I: BufRead,
    O: Write,
    C: ChartRenderer,
{
    pub fn new(service: &'a TaskService<R>, input: I, output: O, chart: C) -> Self {
        Self {
            service,
            input,
            output,
            chart,
        }
    }

    pub fn into_output(self) -> O {
        self.output
    }

    /// Runs until Exit is chosen or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;
            let Some(line) = self.prompt("Enter your choice: ")? else {
                return self.dispatch(MenuChoice::Exit).map(|_| ());
            };

            let flow = match MenuChoice::from_input(&line) {
                Some(choice) => self.dispatch(choice)?,
                None => {
                    writeln!(self.output, "Invalid choice. Please try again.")?;
                    ControlFlow::Continue(())
                }
            };
            if flow.is_break() {
                return Ok(());
            }
        }
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result<ControlFlow<()>> {
        tracing::debug!("Menu choice: {:?}", choice);
        match choice {
            MenuChoice::AddTask => self.add_task()?,
            MenuChoice::ViewTasks => self.view_tasks()?,
            MenuChoice::CompleteTask => self.complete_task()?,
            MenuChoice::VisualizeTasks => self.visualize_tasks()?,
            MenuChoice::Exit => {
                writeln!(self.output, "Exiting... Goodbye!")?;
                return Ok(ControlFlow::Break(()));
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output, "\nTask Prioritization Assistant")?;
        for choice in MenuChoice::ALL {
            writeln!(self.output, "{}. {}", choice.key(), choice.label())?;
        }
        Ok(())
    }

    /// `None` once input is exhausted.
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn add_task(&mut self) -> Result<()> {
        let Some(description) = self.prompt("Enter task description: ")? else {
            return Ok(());
        };
        let Some(due) = self.prompt("Enter due date (YYYY-MM-DD) or leave blank: ")? else {
            return Ok(());
        };

        match self.service.create_task(&description, Some(&due)) {
            Ok(task) => writeln!(
                self.output,
                "Task added successfully! (ID: {}, Priority: {})",
                task.id, task.priority
            )?,
            Err(TaskError::Validation(msg)) => {
                writeln!(self.output, "{} Task not added.", msg)?;
            }
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }

    fn view_tasks(&mut self) -> Result<()> {
        let tasks = self.service.pending_tasks()?;
        if tasks.is_empty() {
            writeln!(self.output, "No tasks found.")?;
            return Ok(());
        }
        writeln!(self.output, "\nYour tasks:")?;
        for task in &tasks {
            writeln!(self.output, "{}", task_line(task))?;
        }
        Ok(())
    }

    fn complete_task(&mut self) -> Result<()> {
        let Some(raw) = self.prompt("Enter the ID of the task to mark as completed: ")? else {
            return Ok(());
        };
        let Ok(id) = raw.trim().parse::<i64>() else {
            writeln!(self.output, "Invalid task ID '{}'.", raw.trim())?;
            return Ok(());
        };

        match self.service.complete_task(id)? {
            Completion::Completed => writeln!(self.output, "Task marked as completed!")?,
            Completion::Unchanged => writeln!(self.output, "No pending task with ID {}.", id)?,
        }
        Ok(())
    }

    fn visualize_tasks(&mut self) -> Result<()> {
        let bars = self.service.priority_chart()?;
        if bars.is_empty() {
            writeln!(self.output, "No tasks to visualize.")?;
            return Ok(());
        }
        self.chart.render(&bars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prioritask_core::{PriorityBar, SqliteTaskRepository};
    use std::io::Cursor;

    #[derive(Default)]
    struct RecordingChart {
        calls: Vec<Vec<PriorityBar>>,
    }

    impl ChartRenderer for RecordingChart {
        fn render(&mut self, bars: &[PriorityBar]) -> Result<()> {
            self.calls.push(bars.to_vec());
            Ok(())
        }
    }

    fn service() -> TaskService<SqliteTaskRepository> {
        TaskService::new(SqliteTaskRepository::open_in_memory().unwrap())
    }

    fn run_script(
        service: &TaskService<SqliteTaskRepository>,
        chart: &mut RecordingChart,
        script: &str,
    ) -> String {
        let mut menu = Menu::new(service, Cursor::new(script.to_string()), Vec::new(), chart);
        menu.run().unwrap();
        String::from_utf8(menu.into_output()).unwrap()
    }

    #[test]
    fn test_menu_choice_from_input() {
        assert_eq!(MenuChoice::from_input("1"), Some(MenuChoice::AddTask));
        assert_eq!(MenuChoice::from_input(" 4 \n"), Some(MenuChoice::VisualizeTasks));
        assert_eq!(MenuChoice::from_input("5"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::from_input("6"), None);
        assert_eq!(MenuChoice::from_input("add"), None);
    }

    #[test]
    fn test_add_then_view() {
        let service = service();
        let mut chart = RecordingChart::default();
        let out = run_script(&service, &mut chart, "1\nBuy milk\n\n2\n5\n");

        assert!(out.contains("Task added successfully! (ID: 1, Priority: 0)"));
        assert!(out.contains("Your tasks:"));
        assert!(out.contains("ID: 1, Description: Buy milk, Due Date: -, Priority: 0, Status: Pending"));
        assert!(out.ends_with("Exiting... Goodbye!\n"));
    }

    #[test]
    fn test_invalid_date_is_reported_and_loop_continues() {
        let service = service();
        let mut chart = RecordingChart::default();
        let out = run_script(&service, &mut chart, "1\nx\nnot-a-date\n2\n5\n");

        assert!(out.contains("Task not added."));
        assert!(out.contains("No tasks found."));
        assert!(service.all_tasks().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_choice() {
        let service = service();
        let mut chart = RecordingChart::default();
        let out = run_script(&service, &mut chart, "9\n5\n");
        assert!(out.contains("Invalid choice. Please try again."));
    }

    #[test]
    fn test_complete_task_flow() {
        let service = service();
        let task = service.create_task("Urgent call", None).unwrap();
        let mut chart = RecordingChart::default();
        let script = format!("3\n{}\n3\n999\n3\nabc\n2\n5\n", task.id);
        let out = run_script(&service, &mut chart, &script);

        assert!(out.contains("Task marked as completed!"));
        assert!(out.contains("No pending task with ID 999."));
        assert!(out.contains("Invalid task ID 'abc'."));
        assert!(out.contains("No tasks found."));
    }

    #[test]
    fn test_visualize_uses_pending_tasks() {
        let service = service();
        let mut chart = RecordingChart::default();
        run_script(&service, &mut chart, "4\n5\n");
        assert!(chart.calls.is_empty());

        service.create_task("Important review", None).unwrap();
        service.create_task("Nap", None).unwrap();
        let out = run_script(&service, &mut chart, "4\n5\n");
        assert!(!out.contains("No tasks to visualize."));
        assert_eq!(chart.calls.len(), 1);
        assert_eq!(chart.calls[0][0].label, "Important review");
        assert_eq!(chart.calls[0][0].priority, 2);
        assert_eq!(chart.calls[0][1].label, "Nap");
    }

    #[test]
    fn test_end_of_input_exits() {
        let service = service();
        let mut chart = RecordingChart::default();
        let out = run_script(&service, &mut chart, "2\n");
        assert!(out.ends_with("Exiting... Goodbye!\n"));
    }
}
