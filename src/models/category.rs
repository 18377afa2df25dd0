//! Fixed document category enumeration.
//!
//! Providers are shown this list verbatim and any suggestion outside it is
//! discarded, so entries must stay stable once released.

pub const DOCUMENT_CATEGORIES: &[&str] = &[
    // Finance
    "Financial Documents",
    "Invoices",
    "Receipts",
    "Purchase Orders",
    "Budgets",
    "Financial Statements",
    "Tax Documents",
    "Payroll",
    "Expense Reports",
    "Bank Statements",
    "Audit Reports",
    "Insurance Documents",
    // Legal
    "Legal Documents",
    "Contracts",
    "Agreements",
    "Non-Disclosure Agreements",
    "Licenses",
    "Permits",
    "Court Filings",
    "Regulatory Filings",
    "Compliance Documents",
    "Intellectual Property",
    "Corporate Governance",
    "Board Minutes",
    // People
    "Human Resources",
    "Employee Records",
    "Job Descriptions",
    "Resumes",
    "Performance Reviews",
    "Training Materials",
    "Benefits Documents",
    "Onboarding Documents",
    "Policies",
    "Procedures",
    "Employee Handbook",
    // Operations
    "Operations",
    "Standard Operating Procedures",
    "Inventory Records",
    "Shipping Documents",
    "Vendor Documents",
    "Supplier Agreements",
    "Quality Assurance",
    "Maintenance Records",
    "Safety Documents",
    "Incident Reports",
    // Projects and engineering
    "Project Documents",
    "Project Plans",
    "Requirements",
    "Technical Documentation",
    "Specifications",
    "Architecture Diagrams",
    "Source Code",
    "Test Plans",
    "Release Notes",
    "User Manuals",
    "Research Papers",
    // Sales and marketing
    "Marketing Materials",
    "Press Releases",
    "Brochures",
    "Presentations",
    "Proposals",
    "Sales Reports",
    "Customer Records",
    "Customer Correspondence",
    "Market Research",
    "Brand Guidelines",
    // Communication and records
    "Correspondence",
    "Memos",
    "Meeting Notes",
    "Reports",
    "Newsletters",
    "Forms",
    "Templates",
    "Certificates",
    // Sector specific
    "Medical Records",
    "Health and Safety",
    "Real Estate Documents",
    "Government Documents",
    "Security Documents",
    "IT Documents",
    "Academic Records",
    "Personal Documents",
    "Images",
    "Miscellaneous",
];

/// Exact, case-sensitive membership test.
pub fn is_known_category(name: &str) -> bool {
    DOCUMENT_CATEGORIES.contains(&name)
}
