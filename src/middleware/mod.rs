/*
 * Responsibility
 * - Public surface of the middleware layer
 * - auth: bearer gate (access) and admin gate (admin)
 * - cors / http: cross-cutting transport concerns applied in app.rs
 */
pub mod auth;
pub mod cors;
pub mod http;
