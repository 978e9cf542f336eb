use crate::{
    auth,
    models::{InsertProduct, InsertService, InsertUser},
    repository::RepositoryState,
};

/// Username of the bootstrap administrator account.
pub const ADMIN_USERNAME: &str = "admin@petshop.com";

/// seed_database
///
/// Populates an empty store with the demo catalog and the administrator
/// account. Idempotent: keyed on the admin username, so a store that has
/// already been seeded (or where an admin was created by other means) is
/// left untouched.
///
/// # Panics
/// Panics if the admin credential cannot be hashed; seeding runs at startup
/// where fail-fast is the right behavior.
pub async fn seed_database(repo: &RepositoryState) {
    if repo.get_user_by_username(ADMIN_USERNAME).await.is_some() {
        return;
    }

    tracing::info!("seeding demo data");

    let admin_password =
        auth::hash_password("admin123").expect("FATAL: failed to hash seed admin password");

    // The duplicate-username path is unreachable here: we just checked.
    let _ = repo
        .create_user(InsertUser {
            username: ADMIN_USERNAME.to_string(),
            password: admin_password,
            name: "Administrador".to_string(),
            role: "admin".to_string(),
        })
        .await;

    let products = [
        InsertProduct {
            name: "Ração Premium Cães Adultos 15kg".to_string(),
            description: "Ração de alta qualidade para cães de todas as raças.".to_string(),
            price: 24990,
            category: "Ração".to_string(),
            image_url: "https://images.unsplash.com/photo-1589924691195-41432c84c161?w=500&q=80"
                .to_string(),
        },
        InsertProduct {
            name: "Brinquedo Mordedor Resistente".to_string(),
            description: "Ideal para cães que gostam de roer. Material atóxico.".to_string(),
            price: 4990,
            category: "Brinquedos".to_string(),
            image_url: "https://images.unsplash.com/photo-1576201836106-db1758fd1c97?w=500&q=80"
                .to_string(),
        },
        InsertProduct {
            name: "Shampoo Pet Cheirinho de Bebê".to_string(),
            description: "Hipoalergênico e com pH balanceado.".to_string(),
            price: 3500,
            category: "Higiene".to_string(),
            image_url: "https://images.unsplash.com/photo-1585846416120-3a7354ed7d6d?w=500&q=80"
                .to_string(),
        },
        InsertProduct {
            name: "Coleira Ajustável com Pingente".to_string(),
            description: "Conforto e segurança para o seu passeio.".to_string(),
            price: 5990,
            category: "Acessórios".to_string(),
            image_url: "https://images.unsplash.com/photo-1599561046251-cc796a6e932c?w=500&q=80"
                .to_string(),
        },
    ];

    for product in products {
        repo.create_product(product).await;
    }

    let services = [
        InsertService {
            name: "Banho Completo".to_string(),
            description: "Lavagem, secagem, corte de unhas e limpeza de ouvidos.".to_string(),
            price: 6000,
            duration: 60,
            image_url: "https://images.unsplash.com/photo-1516734212186-a967f81ad0d7?w=500&q=80"
                .to_string(),
        },
        InsertService {
            name: "Tosa Higiênica".to_string(),
            description: "Corte dos pelos nas patas e áreas íntimas.".to_string(),
            price: 4000,
            duration: 30,
            image_url: "https://images.unsplash.com/photo-1599443015574-be5fe8a05783?w=500&q=80"
                .to_string(),
        },
        InsertService {
            name: "Consulta Veterinária".to_string(),
            description: "Avaliação geral da saúde do seu pet.".to_string(),
            price: 15000,
            duration: 30,
            image_url: "https://images.unsplash.com/photo-1628009368231-760335298025?w=500&q=80"
                .to_string(),
        },
        InsertService {
            name: "Adestramento Comportamental".to_string(),
            description: "Sessões individuais para melhorar o comportamento e obediência."
                .to_string(),
            price: 12000,
            duration: 60,
            image_url: "https://images.unsplash.com/photo-1583511655857-d19b40a7a54e?w=500&q=80"
                .to_string(),
        },
        InsertService {
            name: "Hospedagem Pet".to_string(),
            description: "Ambiente seguro e confortável para o seu pet passar a noite.".to_string(),
            price: 8000,
            duration: 1440,
            image_url: "https://images.unsplash.com/photo-1548199973-03cce0bbc87b?w=500&q=80"
                .to_string(),
        },
        InsertService {
            name: "Fisioterapia e Reabilitação".to_string(),
            description: "Tratamentos especializados para recuperação motora.".to_string(),
            price: 18000,
            duration: 45,
            image_url: "https://images.unsplash.com/photo-1576201836106-db1758fd1c97?w=500&q=80"
                .to_string(),
        },
    ];

    for service in services {
        repo.create_service(service).await;
    }
}
