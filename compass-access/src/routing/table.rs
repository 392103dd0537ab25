//! Route table
//!
//! Each role owns the `/<role>/` subtree. Every page in a subtree requires
//! that subtree's role; `/login` is the only public page and `/` redirects
//! to it.

use compass_core::Role;
use serde::Serialize;

/// One page inside a portal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortalPage {
    pub role: Role,
    /// Last path segment, e.g. `dashboard`
    pub slug: &'static str,
    /// Page heading
    pub title: &'static str,
    /// Sidebar label
    pub nav_title: &'static str,
}

impl PortalPage {
    const fn new(
        role: Role,
        slug: &'static str,
        title: &'static str,
        nav_title: &'static str,
    ) -> Self {
        Self {
            role,
            slug,
            title,
            nav_title,
        }
    }

    pub fn path(&self) -> String {
        format!("/{}/{}", self.role, self.slug)
    }
}

/// Sidebar entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub title: &'static str,
    pub href: String,
}

/// Result of resolving a path against the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteMatch<'a> {
    /// The login page
    Public,
    Redirect(String),
    /// Inside a portal subtree. `page` is `None` when the subtree has no page
    /// with that name.
    Portal {
        role: Role,
        page: Option<&'a PortalPage>,
    },
    NotFound,
}

static STUDENT_PAGES: [PortalPage; 8] = [
    PortalPage::new(Role::Student, "dashboard", "Student Dashboard", "Dashboard"),
    PortalPage::new(Role::Student, "profile", "Student Profile", "Profile"),
    PortalPage::new(Role::Student, "courses", "Student Courses", "Courses"),
    PortalPage::new(Role::Student, "attendance", "Student Attendance", "Attendance"),
    PortalPage::new(Role::Student, "exams", "Student Exams", "Exams"),
    PortalPage::new(Role::Student, "results", "Student Results", "Results"),
    PortalPage::new(Role::Student, "fees", "Student Fees", "Fees"),
    PortalPage::new(Role::Student, "notices", "Student Notices", "Notices"),
];

static FACULTY_PAGES: [PortalPage; 6] = [
    PortalPage::new(Role::Faculty, "dashboard", "Faculty Dashboard", "Dashboard"),
    PortalPage::new(Role::Faculty, "profile", "Faculty Profile", "Profile"),
    PortalPage::new(Role::Faculty, "subjects", "Faculty Subjects", "Subjects"),
    PortalPage::new(Role::Faculty, "attendance", "Faculty Attendance", "Attendance"),
    PortalPage::new(Role::Faculty, "marks", "Mark Entry", "Mark Entry"),
    PortalPage::new(Role::Faculty, "materials", "Course Materials", "Materials"),
];

static ADMIN_PAGES: [PortalPage; 8] = [
    PortalPage::new(Role::Admin, "dashboard", "Admin Dashboard", "Dashboard"),
    PortalPage::new(Role::Admin, "students", "Student Management", "Students"),
    PortalPage::new(Role::Admin, "faculty", "Faculty Management", "Faculty"),
    PortalPage::new(Role::Admin, "courses", "Course Management", "Courses"),
    PortalPage::new(Role::Admin, "exams", "Exam Management", "Exams"),
    PortalPage::new(Role::Admin, "fees", "Fee Management", "Fees"),
    PortalPage::new(Role::Admin, "notices", "Notice Management", "Notices"),
    PortalPage::new(Role::Admin, "settings", "Admin Settings", "Settings"),
];

/// Static route declarations for the three portals
#[derive(Debug, Clone)]
pub struct RouteTable {
    login_path: String,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new("/login")
    }
}

impl RouteTable {
    pub fn new<S: Into<String>>(login_path: S) -> Self {
        Self {
            login_path: login_path.into(),
        }
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Pages of one portal, in sidebar order
    pub fn pages(&self, role: Role) -> &'static [PortalPage] {
        match role {
            Role::Student => &STUDENT_PAGES,
            Role::Faculty => &FACULTY_PAGES,
            Role::Admin => &ADMIN_PAGES,
        }
    }

    /// Where the login form sends a freshly signed-in account
    pub fn landing_path(&self, role: Role) -> String {
        format!("/{}/dashboard", role)
    }

    /// Sidebar entries for `role`; empty when nobody is signed in
    pub fn menu(&self, role: Option<Role>) -> Vec<MenuItem> {
        let Some(role) = role else {
            return Vec::new();
        };

        self.pages(role)
            .iter()
            .map(|page| MenuItem {
                title: page.nav_title,
                href: page.path(),
            })
            .collect()
    }

    /// Resolve a request path. Query strings and trailing slashes are
    /// ignored; matching is case-sensitive.
    pub fn resolve(&self, path: &str) -> RouteMatch<'static> {
        let path = normalize(path);

        if path == "/" {
            return RouteMatch::Redirect(self.login_path.clone());
        }
        if path == self.login_path {
            return RouteMatch::Public;
        }

        let mut segments = path.trim_start_matches('/').splitn(2, '/');
        let portal = segments.next().unwrap_or_default();
        let rest = segments.next();

        let Some(role) = Role::ALL.into_iter().find(|role| role.as_str() == portal) else {
            return RouteMatch::NotFound;
        };

        let page = rest.and_then(|slug| self.pages(role).iter().find(|page| page.slug == slug));
        RouteMatch::Portal { role, page }
    }
}

fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}
