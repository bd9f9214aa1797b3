//! Demo dataset loaded by `seed-database`: two administrators, three
//! clients with their logins and a two-to-three month ledger per client.

use chrono::NaiveDate;
use models::{Administrator, Client, ClientLogin, LedgerDatabase, Transaction};

use crate::credentials::hash_password;

type SeedTransaction = (i64, &'static str, (i32, u32, u32), &'static str, &'static str, f64);

const TRANSACTIONS: &[SeedTransaction] = &[
    // Client 1
    (1, "TR1-001-2025", (2025, 1, 5), "dépôt", "Dépôt guichet", -15000.0),
    (1, "TR2-001-2025", (2025, 1, 8), "paiement", "Paiement supermarché DOVV", -10000.0),
    (1, "TR3-001-2025", (2025, 1, 12), "retrait", "Retrait ATM BICEC", -175000.0),
    (1, "TR4-001-2025", (2025, 1, 18), "virement", "Virement vers compte épargne", -85000.0),
    (1, "TR5-001-2025", (2025, 1, 22), "prélèvement", "Abonnement Canal+", -15000.0),
    (1, "TR6-001-2025", (2025, 1, 29), "paiement", "Station-service Tradex", 33000.0),
    (1, "TR7-002-2025", (2025, 2, 3), "dépôt", "Dépôt mobile money", -5000.0),
    (1, "TR8-002-2025", (2025, 2, 6), "paiement", "Location voiture", -12000.0),
    (1, "TR9-002-2025", (2025, 2, 10), "retrait", "Retrait ATM Afriland", 6115000.0),
    (1, "TR10-002-2025", (2025, 2, 14), "prélèvement", "Netflix", -5000.0),
    (1, "TR11-002-2025", (2025, 2, 21), "virement", "Virement vers époux", 25000.0),
    // Client 2
    (2, "TR1-002-2025", (2025, 1, 5), "dépôt", "Dépôt guichet", 15000.0),
    (2, "TR2-002-2025", (2025, 1, 8), "paiement", "Paiement supermarché DOVV", -10000.0),
    (2, "TR3-002-2025", (2025, 1, 12), "retrait", "Retrait ATM BICEC", -175000.0),
    (2, "TR4-002-2025", (2025, 1, 18), "virement", "Virement vers compte épargne", -85000.0),
    (2, "TR5-002-2025", (2025, 1, 22), "prélèvement", "Abonnement Canal+", -15000.0),
    (2, "TR6-002-2025", (2025, 1, 29), "paiement", "Station-service Tradex", 33000.0),
    (2, "TR7-002-2025", (2025, 2, 3), "dépôt", "Dépôt mobile money", 5000.0),
    (2, "TR8-002-2025", (2025, 2, 6), "paiement", "Pharmacie La Grâce", 12000.0),
    (2, "TR9-002-2025", (2025, 2, 10), "retrait", "Retrait ATM Afriland", 75000.0),
    (2, "TR1-002-2025", (2025, 2, 14), "prélèvement", "Netflix", 5000.0),
    (2, "TR11-002-2025", (2025, 2, 21), "virement", "Virement vers époux", 40000.0),
    // Client 3
    (3, "TR11-003-2025", (2025, 1, 8), "paiement", "Paiement supermarché DOVV", 10000.0),
    (3, "TR10-003-2025", (2025, 1, 12), "retrait", "Retrait ATM BICEC", 175000.0),
    (3, "TR9-003-2025", (2025, 1, 18), "virement", "Virement vers compte épargne", 85000.0),
    (3, "TR8-003-2025", (2025, 1, 22), "prélèvement", "Abonnement Canal+", 15000.0),
    (3, "TR7-003-2025", (2025, 1, 29), "paiement", "Station-service Tradex", 33000.0),
    (3, "TR1-003-2025", (2025, 3, 2), "paiement", "Restaurant Le Président", 35000.0),
    (3, "TR2-003-2025", (2025, 3, 4), "virement", "Paiement fournisseur", -540000.0),
    (3, "TR3-003-2025", (2025, 3, 7), "dépôt", "Dépôt espèce", 150000.0),
    (3, "TR4-003-2025", (2025, 3, 11), "virement", "virement ATM UBA", 500000.0),
    (3, "TR5-003-2025", (2025, 3, 15), "paiement", "Supermarché Carrefour", -39000.0),
    (3, "TR6-003-2025", (2025, 3, 22), "prélèvement", "Paiement assurance", -50000.0),
];

fn date(ymd: (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2).unwrap_or_default()
}

fn administrators() -> Vec<Administrator> {
    vec![
        Administrator {
            id: 1,
            name: "ADMINPRINCIPAL".to_string(),
            email: "admin1@bankapp.com".to_string(),
            password_hash: hash_password("0123"),
            role: "admin".to_string(),
        },
        Administrator {
            id: 2,
            name: "GESTIONNAIRE".to_string(),
            email: "admin2@bankapp.com".to_string(),
            password_hash: hash_password("0000"),
            role: "admin".to_string(),
        },
    ]
}

fn clients() -> Vec<Client> {
    vec![
        Client {
            id: 1,
            last_name: "Ngono".to_string(),
            first_name: "Paul".to_string(),
            birth_date: date((1990, 4, 12)),
            email: "paul.ngono@example.com".to_string(),
            phone: "694123456".to_string(),
            address: "Yaoundé, Bastos".to_string(),
            profession: "Ingénieur logiciel".to_string(),
            initial_balance: 500000.0,
            iban: "CM79 0020 3000 1234 5678 9012 345".to_string(),
            rib: "30001 00001 12345678901 45".to_string(),
            account_number: "ACC00123456".to_string(),
            card_number: "4567 8923 5566 8910".to_string(),
            card_expiry: "07/28".to_string(),
            card_cvv: "921".to_string(),
        },
        Client {
            id: 2,
            last_name: "Mbia".to_string(),
            first_name: "Clarisse".to_string(),
            birth_date: date((1985, 2, 25)),
            email: "clarisse.mbia@example.com".to_string(),
            phone: "677987654".to_string(),
            address: "Douala, Bonapriso".to_string(),
            profession: "Comptable".to_string(),
            initial_balance: 400000.0,
            iban: "CM79 0040 2000 9876 5432 1098 765".to_string(),
            rib: "20004 00002 98765432109 76".to_string(),
            account_number: "ACC00987654".to_string(),
            card_number: "5234 7789 0012 3478".to_string(),
            card_expiry: "11/27".to_string(),
            card_cvv: "553".to_string(),
        },
        Client {
            id: 3,
            last_name: "Fouda".to_string(),
            first_name: "Didier".to_string(),
            birth_date: date((1993, 10, 8)),
            email: "didier.fouda@example.com".to_string(),
            phone: "650112233".to_string(),
            address: "Yaoundé, Essos".to_string(),
            profession: "Entrepreneur".to_string(),
            initial_balance: 1500000.0,
            iban: "CM79 0050 1000 1122 3344 5566 778".to_string(),
            rib: "10005 00003 11223344556 89".to_string(),
            account_number: "ACC00441122".to_string(),
            card_number: "4123 9987 3344 1122".to_string(),
            card_expiry: "03/29".to_string(),
            card_cvv: "771".to_string(),
        },
    ]
}

fn client_logins() -> Vec<ClientLogin> {
    [
        (1, "paul.ngono@example.com", "1980"),
        (2, "clarisse.mbia@example.com", "1111"),
        (3, "didier.fouda@example.com", "1234"),
    ]
    .into_iter()
    .map(|(client_id, email, password)| ClientLogin {
        id: client_id,
        client_id,
        email: email.to_string(),
        password_hash: hash_password(password),
    })
    .collect()
}

fn transactions() -> Vec<Transaction> {
    TRANSACTIONS
        .iter()
        .zip(1..)
        .map(|(&(client_id, name, ymd, kind, category, amount), id)| Transaction {
            id,
            client_id,
            name: name.to_string(),
            date: date(ymd),
            kind: kind.to_string(),
            category: category.to_string(),
            amount,
        })
        .collect()
}

pub fn demo_database() -> LedgerDatabase {
    LedgerDatabase {
        engine_version: "0.1".to_string(),
        administrators: administrators(),
        clients: clients(),
        client_logins: client_logins(),
        transactions: transactions(),
    }
}
