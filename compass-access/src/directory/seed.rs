//! Built-in demo accounts, one or more per portal

use compass_core::{Account, AccountId, Profile, Role};

/// The accounts listed on the login page's demo credentials panel
pub fn demo_accounts() -> Vec<Account> {
    vec![
        Account {
            id: AccountId::new("1"),
            name: "John Smith".to_string(),
            email: "john.smith@college.edu".to_string(),
            role: Role::Student,
            avatar: Some(
                "https://images.unsplash.com/photo-1649972904349-6e44c42644a7?w=400&h=400&fit=crop"
                    .to_string(),
            ),
            profile: Profile::Student {
                student_id: "CS2021001".to_string(),
                semester: 6,
                department: "Computer Science".to_string(),
                batch: "2021-2025".to_string(),
            },
        },
        Account {
            id: AccountId::new("2"),
            name: "Sarah Johnson".to_string(),
            email: "sarah.johnson@college.edu".to_string(),
            role: Role::Student,
            avatar: None,
            profile: Profile::Student {
                student_id: "EE2021002".to_string(),
                semester: 4,
                department: "Electrical Engineering".to_string(),
                batch: "2021-2025".to_string(),
            },
        },
        Account {
            id: AccountId::new("3"),
            name: "Dr. Michael Chen".to_string(),
            email: "michael.chen@college.edu".to_string(),
            role: Role::Faculty,
            avatar: None,
            profile: Profile::Faculty {
                faculty_id: "FAC001".to_string(),
                department: "Computer Science".to_string(),
                subjects: vec![
                    "Data Structures".to_string(),
                    "Algorithms".to_string(),
                    "Database Systems".to_string(),
                ],
            },
        },
        Account {
            id: AccountId::new("4"),
            name: "Prof. Lisa Anderson".to_string(),
            email: "lisa.anderson@college.edu".to_string(),
            role: Role::Faculty,
            avatar: None,
            profile: Profile::Faculty {
                faculty_id: "FAC002".to_string(),
                department: "Mathematics".to_string(),
                subjects: vec![
                    "Calculus".to_string(),
                    "Linear Algebra".to_string(),
                    "Statistics".to_string(),
                ],
            },
        },
        Account {
            id: AccountId::new("5"),
            name: "Robert Wilson".to_string(),
            email: "robert.wilson@college.edu".to_string(),
            role: Role::Admin,
            avatar: None,
            profile: Profile::Admin {
                admin_id: "ADM001".to_string(),
                permissions: vec!["all".to_string()],
            },
        },
    ]
}
