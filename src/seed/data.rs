//! Fixed demo datasets.
//!
//! The product id in [`CUSTOMER_ORDERS`] (PostgreSQL) points at a product
//! in [`PRODUCTS`] (SQLite); that link is what the cross-catalog joins
//! exercise.

/// `(id, name, budget, location)`
pub type Department = (i64, &'static str, f64, &'static str);

/// `(id, first_name, last_name, email, department_id, salary, hire_date, is_active)`
pub type Employee = (
    i64,
    &'static str,
    &'static str,
    &'static str,
    i64,
    f64,
    &'static str,
    bool,
);

/// `(id, name, category, price, stock)`
pub type Product = (i64, &'static str, &'static str, f64, i64);

/// `(id, employee_id, product_id, quantity, order_date, total_amount)`
pub type Order = (i64, i64, i64, i64, &'static str, f64);

/// `(name, email, country, tier)`; ids are assigned by the database.
pub type Customer = (&'static str, &'static str, &'static str, &'static str);

/// `(customer_id, product_id, quantity, order_date, total_cents)`
///
/// Totals are in cents so NUMERIC(10,2) values stay exact.
pub type CustomerOrder = (i32, i32, i32, &'static str, i64);

pub const DEPARTMENTS: &[Department] = &[
    (1, "Engineering", 1_500_000.00, "San Francisco"),
    (2, "Marketing", 800_000.00, "New York"),
    (3, "Sales", 1_200_000.00, "Chicago"),
    (4, "HR", 500_000.00, "San Francisco"),
    (5, "Finance", 900_000.00, "New York"),
];

pub const EMPLOYEES: &[Employee] = &[
    (1, "Alice", "Johnson", "alice@example.com", 1, 130_000.0, "2020-03-15", true),
    (2, "Bob", "Smith", "bob@example.com", 1, 125_000.0, "2019-07-22", true),
    (3, "Carol", "Williams", "carol@example.com", 2, 95_000.0, "2021-01-10", true),
    (4, "David", "Brown", "david@example.com", 3, 105_000.0, "2018-11-05", true),
    (5, "Eve", "Davis", "eve@example.com", 3, 98_000.0, "2020-06-18", true),
    (6, "Frank", "Miller", "frank@example.com", 4, 85_000.0, "2022-02-28", true),
    (7, "Grace", "Wilson", "grace@example.com", 1, 140_000.0, "2017-09-12", true),
    (8, "Henry", "Moore", "henry@example.com", 5, 115_000.0, "2019-04-03", true),
    (9, "Iris", "Taylor", "iris@example.com", 2, 88_000.0, "2023-08-14", true),
    (10, "Jack", "Anderson", "jack@example.com", 5, 120_000.0, "2018-12-01", false),
    (11, "Karen", "Thomas", "karen@example.com", 1, 135_000.0, "2021-05-20", true),
    (12, "Leo", "Jackson", "leo@example.com", 3, 102_000.0, "2022-10-07", true),
];

pub const PRODUCTS: &[Product] = &[
    (1, "Laptop Pro 15", "Electronics", 1299.99, 150),
    (2, "Wireless Mouse", "Electronics", 29.99, 500),
    (3, "Standing Desk", "Furniture", 549.00, 75),
    (4, "Ergonomic Chair", "Furniture", 399.00, 120),
    (5, "USB-C Hub", "Electronics", 59.99, 300),
    (6, "Monitor 27-inch", "Electronics", 449.99, 200),
    (7, "Keyboard Mechanical", "Electronics", 89.99, 400),
    (8, "Desk Lamp", "Furniture", 35.00, 250),
    (9, "Webcam HD", "Electronics", 79.99, 180),
    (10, "Notebook Pack", "Office", 9.99, 1000),
];

pub const ORDERS: &[Order] = &[
    (1, 1, 1, 1, "2024-01-10", 1299.99),
    (2, 2, 3, 1, "2024-01-15", 549.00),
    (3, 3, 2, 3, "2024-02-01", 89.97),
    (4, 4, 6, 2, "2024-02-14", 899.98),
    (5, 5, 7, 1, "2024-03-01", 89.99),
    (6, 1, 5, 2, "2024-03-10", 119.98),
    (7, 7, 4, 1, "2024-03-22", 399.00),
    (8, 8, 9, 1, "2024-04-05", 79.99),
    (9, 6, 10, 5, "2024-04-18", 49.95),
    (10, 9, 8, 2, "2024-05-02", 70.00),
    (11, 11, 1, 1, "2024-05-15", 1299.99),
    (12, 12, 2, 4, "2024-06-01", 119.96),
    (13, 2, 6, 1, "2024-06-20", 449.99),
    (14, 3, 4, 1, "2024-07-04", 399.00),
    (15, 7, 5, 3, "2024-07-19", 179.97),
];

pub const CUSTOMERS: &[Customer] = &[
    ("Acme Corp", "acme@example.com", "USA", "Enterprise"),
    ("Globex Inc", "globex@example.com", "USA", "Enterprise"),
    ("Initech", "initech@example.com", "USA", "SMB"),
    ("Umbrella Ltd", "umbrella@example.com", "UK", "Enterprise"),
    ("Soylent Co", "soylent@example.com", "Canada", "SMB"),
    ("Cyberdyne", "cyber@example.com", "USA", "Enterprise"),
    ("Tyrell Corp", "tyrell@example.com", "USA", "SMB"),
    ("Oscorp", "oscorp@example.com", "USA", "SMB"),
];

pub const CUSTOMER_ORDERS: &[CustomerOrder] = &[
    (1, 1, 5, "2024-01-05", 649_995),
    (1, 6, 10, "2024-01-20", 449_990),
    (2, 1, 3, "2024-02-10", 389_997),
    (2, 3, 6, "2024-02-15", 329_400),
    (3, 7, 8, "2024-03-01", 71_992),
    (3, 2, 20, "2024-03-10", 59_980),
    (4, 1, 10, "2024-04-01", 1_299_990),
    (4, 4, 4, "2024-04-12", 159_600),
    (5, 5, 15, "2024-05-05", 89_985),
    (5, 9, 8, "2024-05-20", 63_992),
    (6, 1, 7, "2024-06-01", 909_993),
    (6, 6, 5, "2024-06-15", 224_995),
    (7, 7, 12, "2024-07-01", 107_988),
    (7, 10, 50, "2024-07-10", 49_950),
    (8, 2, 30, "2024-08-01", 89_970),
    (8, 8, 10, "2024-08-15", 35_000),
];
