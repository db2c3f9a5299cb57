//! Initial database migration.
//!
//! Creates all enums, tables, sequences, and indexes for the order-to-cash
//! schema.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: MASTER DATA
        // ============================================================
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(PARTNERS_SQL).await?;
        db.execute_unprepared(PRODUCTS_SQL).await?;
        db.execute_unprepared(TAX_RATES_SQL).await?;

        // ============================================================
        // PART 3: SALE ORDERS
        // ============================================================
        db.execute_unprepared(SALE_ORDERS_SQL).await?;
        db.execute_unprepared(SALE_ORDER_LINES_SQL).await?;

        // ============================================================
        // PART 4: AR INVOICES
        // ============================================================
        db.execute_unprepared(AR_INVOICES_SQL).await?;
        db.execute_unprepared(AR_INVOICE_LINES_SQL).await?;

        // ============================================================
        // PART 5: AR RECEIPTS & ALLOCATIONS
        // ============================================================
        db.execute_unprepared(AR_RECEIPTS_SQL).await?;
        db.execute_unprepared(AR_RECEIPT_ALLOCATIONS_SQL).await?;

        // ============================================================
        // PART 6: GENERAL LEDGER
        // ============================================================
        db.execute_unprepared(GL_ENTRIES_SQL).await?;
        db.execute_unprepared(GL_ENTRY_LINES_SQL).await?;

        // ============================================================
        // PART 7: DOCUMENT NUMBER SEQUENCES
        // ============================================================
        db.execute_unprepared(SEQUENCES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- User roles
CREATE TYPE user_role AS ENUM (
    'sales',
    'salesmanager',
    'account',
    'chacc',
    'ceo'
);

-- Approval workflow status (shared by orders, invoices, receipts)
CREATE TYPE approval_status AS ENUM (
    'draft',
    'waiting_approval',
    'approved',
    'rejected'
);

-- Sale order operational status
CREATE TYPE order_status AS ENUM (
    'draft',
    'confirmed',
    'shipped',
    'completed',
    'cancelled'
);

-- AR invoice operational status
CREATE TYPE invoice_status AS ENUM (
    'draft',
    'posted',
    'paid',
    'cancelled'
);

-- AR receipt operational status
CREATE TYPE receipt_status AS ENUM (
    'draft',
    'posted',
    'cancelled'
);

-- AR receipt allocation progress
CREATE TYPE allocation_status AS ENUM (
    'unallocated',
    'partially_allocated',
    'fully_allocated'
);

-- Receipt payment methods
CREATE TYPE payment_method AS ENUM (
    'cash',
    'bank_transfer',
    'card',
    'cheque'
);

-- GL entry reference document types
CREATE TYPE gl_reference_type AS ENUM (
    'ar_invoice',
    'ar_receipt'
);

-- Ledger accounts touched by the order-to-cash flow
CREATE TYPE ledger_account AS ENUM (
    'accounts_receivable',
    'revenue',
    'tax_payable',
    'cash'
);
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY,
    username VARCHAR(64) NOT NULL UNIQUE,
    full_name VARCHAR(255) NOT NULL,
    role user_role NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const PARTNERS_SQL: &str = r"
CREATE TABLE partners (
    id UUID PRIMARY KEY,
    code VARCHAR(32) NOT NULL UNIQUE,
    name VARCHAR(255) NOT NULL,
    tax_code VARCHAR(32),
    address TEXT,
    phone VARCHAR(32),
    is_customer BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const PRODUCTS_SQL: &str = r"
CREATE TABLE products (
    id UUID PRIMARY KEY,
    sku VARCHAR(64) NOT NULL UNIQUE,
    name VARCHAR(255) NOT NULL,
    unit_price NUMERIC(19, 4) NOT NULL CHECK (unit_price >= 0),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const TAX_RATES_SQL: &str = r"
CREATE TABLE tax_rates (
    id UUID PRIMARY KEY,
    code VARCHAR(32) NOT NULL UNIQUE,
    name VARCHAR(255) NOT NULL,
    rate NUMERIC(7, 4) NOT NULL CHECK (rate >= 0),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const SALE_ORDERS_SQL: &str = r"
CREATE TABLE sale_orders (
    id UUID PRIMARY KEY,
    order_no VARCHAR(32) NOT NULL UNIQUE,
    customer_id UUID NOT NULL REFERENCES partners(id),
    status order_status NOT NULL DEFAULT 'draft',
    approval_status approval_status NOT NULL DEFAULT 'draft',
    total_before_tax NUMERIC(19, 4) NOT NULL DEFAULT 0,
    total_tax NUMERIC(19, 4) NOT NULL DEFAULT 0,
    total_after_tax NUMERIC(19, 4) NOT NULL DEFAULT 0,
    submitted_at TIMESTAMPTZ,
    submitted_by UUID REFERENCES users(id),
    approved_at TIMESTAMPTZ,
    approved_by UUID REFERENCES users(id),
    reject_reason TEXT,
    created_by UUID NOT NULL REFERENCES users(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_sale_orders_customer ON sale_orders(customer_id);
CREATE INDEX idx_sale_orders_status ON sale_orders(status);
CREATE INDEX idx_sale_orders_approval ON sale_orders(approval_status);
";

const SALE_ORDER_LINES_SQL: &str = r"
CREATE TABLE sale_order_lines (
    id UUID PRIMARY KEY,
    order_id UUID NOT NULL REFERENCES sale_orders(id) ON DELETE CASCADE,
    product_id UUID NOT NULL REFERENCES products(id),
    quantity NUMERIC(19, 4) NOT NULL CHECK (quantity > 0),
    unit_price NUMERIC(19, 4) NOT NULL CHECK (unit_price >= 0),
    tax_rate_id UUID NOT NULL REFERENCES tax_rates(id),
    tax_rate NUMERIC(7, 4) NOT NULL CHECK (tax_rate >= 0),
    line_total NUMERIC(19, 4) NOT NULL,
    line_total_after_tax NUMERIC(19, 4) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_sale_order_lines_order ON sale_order_lines(order_id);
";

const AR_INVOICES_SQL: &str = r"
CREATE TABLE ar_invoices (
    id UUID PRIMARY KEY,
    invoice_no VARCHAR(32) NOT NULL UNIQUE,
    -- At most one invoice per order
    order_id UUID NOT NULL UNIQUE REFERENCES sale_orders(id),
    customer_id UUID NOT NULL REFERENCES partners(id),
    status invoice_status NOT NULL DEFAULT 'draft',
    approval_status approval_status NOT NULL DEFAULT 'draft',
    total_before_tax NUMERIC(19, 4) NOT NULL DEFAULT 0,
    total_tax NUMERIC(19, 4) NOT NULL DEFAULT 0,
    total_after_tax NUMERIC(19, 4) NOT NULL DEFAULT 0,
    submitted_at TIMESTAMPTZ,
    submitted_by UUID REFERENCES users(id),
    approved_at TIMESTAMPTZ,
    approved_by UUID REFERENCES users(id),
    reject_reason TEXT,
    posted_at TIMESTAMPTZ,
    posted_by UUID REFERENCES users(id),
    created_by UUID NOT NULL REFERENCES users(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_ar_invoices_customer ON ar_invoices(customer_id);
CREATE INDEX idx_ar_invoices_status ON ar_invoices(status);
";

const AR_INVOICE_LINES_SQL: &str = r"
CREATE TABLE ar_invoice_lines (
    id UUID PRIMARY KEY,
    invoice_id UUID NOT NULL REFERENCES ar_invoices(id) ON DELETE CASCADE,
    product_id UUID NOT NULL REFERENCES products(id),
    quantity NUMERIC(19, 4) NOT NULL CHECK (quantity > 0),
    unit_price NUMERIC(19, 4) NOT NULL CHECK (unit_price >= 0),
    tax_rate_id UUID NOT NULL REFERENCES tax_rates(id),
    tax_rate NUMERIC(7, 4) NOT NULL CHECK (tax_rate >= 0),
    line_total NUMERIC(19, 4) NOT NULL,
    line_total_after_tax NUMERIC(19, 4) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_ar_invoice_lines_invoice ON ar_invoice_lines(invoice_id);
";

const AR_RECEIPTS_SQL: &str = r"
CREATE TABLE ar_receipts (
    id UUID PRIMARY KEY,
    receipt_no VARCHAR(32) NOT NULL UNIQUE,
    customer_id UUID NOT NULL REFERENCES partners(id),
    amount NUMERIC(19, 4) NOT NULL CHECK (amount > 0),
    method payment_method NOT NULL,
    status receipt_status NOT NULL DEFAULT 'draft',
    approval_status approval_status NOT NULL DEFAULT 'draft',
    allocation_status allocation_status NOT NULL DEFAULT 'unallocated',
    submitted_at TIMESTAMPTZ,
    submitted_by UUID REFERENCES users(id),
    approved_at TIMESTAMPTZ,
    approved_by UUID REFERENCES users(id),
    reject_reason TEXT,
    posted_at TIMESTAMPTZ,
    posted_by UUID REFERENCES users(id),
    created_by UUID NOT NULL REFERENCES users(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_ar_receipts_customer ON ar_receipts(customer_id);
CREATE INDEX idx_ar_receipts_status ON ar_receipts(status);
";

const AR_RECEIPT_ALLOCATIONS_SQL: &str = r"
CREATE TABLE ar_receipt_allocations (
    id UUID PRIMARY KEY,
    receipt_id UUID NOT NULL REFERENCES ar_receipts(id),
    invoice_id UUID NOT NULL REFERENCES ar_invoices(id),
    applied_amount NUMERIC(19, 4) NOT NULL CHECK (applied_amount > 0),
    created_by UUID NOT NULL REFERENCES users(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_ar_receipt_allocations_receipt ON ar_receipt_allocations(receipt_id);
CREATE INDEX idx_ar_receipt_allocations_invoice ON ar_receipt_allocations(invoice_id);
";

const GL_ENTRIES_SQL: &str = r"
CREATE TABLE gl_entries (
    id UUID PRIMARY KEY,
    entry_no VARCHAR(32) NOT NULL UNIQUE,
    reference_type gl_reference_type NOT NULL,
    reference_id UUID NOT NULL,
    purpose VARCHAR(64) NOT NULL,
    description TEXT NOT NULL,
    posted_by UUID NOT NULL REFERENCES users(id),
    posted_at TIMESTAMPTZ NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    -- One entry per (document, purpose): retried postings must not double-post
    CONSTRAINT uq_gl_entries_reference UNIQUE (reference_type, reference_id, purpose)
);

CREATE INDEX idx_gl_entries_reference ON gl_entries(reference_type, reference_id);
";

const GL_ENTRY_LINES_SQL: &str = r"
CREATE TABLE gl_entry_lines (
    id UUID PRIMARY KEY,
    entry_id UUID NOT NULL REFERENCES gl_entries(id) ON DELETE CASCADE,
    account ledger_account NOT NULL,
    account_code VARCHAR(16) NOT NULL,
    debit NUMERIC(19, 4) NOT NULL DEFAULT 0 CHECK (debit >= 0),
    credit NUMERIC(19, 4) NOT NULL DEFAULT 0 CHECK (credit >= 0),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    -- Exactly one side per line
    CONSTRAINT ck_gl_entry_lines_one_side CHECK ((debit > 0) <> (credit > 0))
);

CREATE INDEX idx_gl_entry_lines_entry ON gl_entry_lines(entry_id);
";

const SEQUENCES_SQL: &str = r"
CREATE SEQUENCE sale_order_no_seq START 1;
CREATE SEQUENCE ar_invoice_no_seq START 1;
CREATE SEQUENCE ar_receipt_no_seq START 1;
CREATE SEQUENCE gl_entry_no_seq START 1;
";

const DROP_ALL_SQL: &str = r"
DROP SEQUENCE IF EXISTS gl_entry_no_seq;
DROP SEQUENCE IF EXISTS ar_receipt_no_seq;
DROP SEQUENCE IF EXISTS ar_invoice_no_seq;
DROP SEQUENCE IF EXISTS sale_order_no_seq;

DROP TABLE IF EXISTS gl_entry_lines;
DROP TABLE IF EXISTS gl_entries;
DROP TABLE IF EXISTS ar_receipt_allocations;
DROP TABLE IF EXISTS ar_receipts;
DROP TABLE IF EXISTS ar_invoice_lines;
DROP TABLE IF EXISTS ar_invoices;
DROP TABLE IF EXISTS sale_order_lines;
DROP TABLE IF EXISTS sale_orders;
DROP TABLE IF EXISTS tax_rates;
DROP TABLE IF EXISTS products;
DROP TABLE IF EXISTS partners;
DROP TABLE IF EXISTS users;

DROP TYPE IF EXISTS ledger_account;
DROP TYPE IF EXISTS gl_reference_type;
DROP TYPE IF EXISTS payment_method;
DROP TYPE IF EXISTS allocation_status;
DROP TYPE IF EXISTS receipt_status;
DROP TYPE IF EXISTS invoice_status;
DROP TYPE IF EXISTS order_status;
DROP TYPE IF EXISTS approval_status;
DROP TYPE IF EXISTS user_role;
";
