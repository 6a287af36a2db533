pub mod shared {
    pub mod infrastructure {
        pub mod job_queue;
        pub mod report_store;
        pub mod upload_directory;
    }
}

pub mod modules {
    pub mod schedules {
        pub mod core {
            pub mod extraction;
            pub mod grid;
            pub mod late_shift;
            pub mod period;
            pub mod roster;
            pub mod row_classifier;
            pub mod schedule_entry;
            pub mod time;
            pub mod validation;
            pub mod work_mode;
        }
        pub mod use_cases {
            pub mod import_schedule {
                pub mod command;
                pub mod errors;
                pub mod handler;
                pub mod notifier;
                pub mod session;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod assign_activities {
                pub mod handler;
                pub mod scheduler;
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod activity_assigner;
                pub mod activity_assigner_in_memory;
                pub mod report_client;
                pub mod report_client_http;
                pub mod report_client_in_memory;
                pub mod schedule_repository;
                pub mod schedule_repository_in_memory;
                pub mod staff_directory;
                pub mod staff_directory_in_memory;
                pub mod workbook;
                pub mod workbook_calamine;
                pub mod workbook_in_memory;
            }
        }
    }
}

pub mod shell;
