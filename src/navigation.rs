/// Places a texting session can send the texter when it ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Todos { organization_id: String },
    Home { organization_id: String },
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Todos { organization_id } => format!("/app/{}/todos", organization_id),
            Route::Home { organization_id } => format!("/app/{}", organization_id),
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}

pub trait Navigator {
    fn navigate(&mut self, route: Route);
}

/// Collects routes instead of leaving; for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    pub routes: Vec<Route>,
}

#[cfg(test)]
impl Navigator for RecordingNavigator {
    fn navigate(&mut self, route: Route) {
        self.routes.push(route);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        let todos = Route::Todos {
            organization_id: "7".to_string(),
        };
        assert_eq!(todos.path(), "/app/7/todos");

        let home = Route::Home {
            organization_id: String::new(),
        };
        assert_eq!(home.to_string(), "/app/");
    }
}
