//! Application service wiring.
//!
//! One `AppServices` value owns every store behind the HTTP surface. All
//! stores are tenant-keyed except the marketplace catalog (global by
//! design) and the certificate code index, which exists so certificate
//! verification can answer without knowing the owner up front.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use climabill_auth::TokenService;
use climabill_core::{
    CertificateId, ChainRecordId, ChainTargetId, InitiativeId, RecordId, SourceId, SupplierId,
    TargetId, TenantId,
};
use climabill_emissions::{EmissionRecord, EmissionSource};
use climabill_infra::{IdentityStore, InMemoryTenantStore, TenantStore};
use climabill_initiatives::{CarbonTarget, ReductionInitiative};
use climabill_marketplace::{CarbonCertificate, ListingCatalog};
use climabill_suppliers::{Supplier, SupplyChainEmission, SupplyChainTarget};

pub struct AppServices {
    tokens: Arc<TokenService>,
    pub identity: IdentityStore,
    pub sources: InMemoryTenantStore<SourceId, EmissionSource>,
    pub records: InMemoryTenantStore<RecordId, EmissionRecord>,
    pub targets: InMemoryTenantStore<TargetId, CarbonTarget>,
    pub initiatives: InMemoryTenantStore<InitiativeId, ReductionInitiative>,
    pub suppliers: InMemoryTenantStore<SupplierId, Supplier>,
    pub chain_emissions: InMemoryTenantStore<ChainRecordId, SupplyChainEmission>,
    pub chain_targets: InMemoryTenantStore<ChainTargetId, SupplyChainTarget>,
    pub certificates: InMemoryTenantStore<CertificateId, CarbonCertificate>,
    pub marketplace: RwLock<ListingCatalog>,
    certificate_index: RwLock<HashMap<String, (TenantId, CertificateId)>>,
}

impl AppServices {
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            tokens: Arc::new(TokenService::new(jwt_secret)),
            identity: IdentityStore::new(),
            sources: InMemoryTenantStore::new(),
            records: InMemoryTenantStore::new(),
            targets: InMemoryTenantStore::new(),
            initiatives: InMemoryTenantStore::new(),
            suppliers: InMemoryTenantStore::new(),
            chain_emissions: InMemoryTenantStore::new(),
            chain_targets: InMemoryTenantStore::new(),
            certificates: InMemoryTenantStore::new(),
            marketplace: RwLock::new(ListingCatalog::seed()),
            certificate_index: RwLock::new(HashMap::new()),
        }
    }

    pub fn token_service(&self) -> Arc<TokenService> {
        self.tokens.clone()
    }

    /// Store a certificate and index its code for verification lookups.
    pub fn store_certificate(&self, certificate: CarbonCertificate) {
        if let Ok(mut index) = self.certificate_index.write() {
            index.insert(
                certificate.certificate_code.clone(),
                (certificate.tenant_id, certificate.id),
            );
        }
        self.certificates
            .upsert(certificate.tenant_id, certificate.id, certificate);
    }

    /// Resolve a certificate by code regardless of owner (verification).
    pub fn certificate_by_code(&self, code: &str) -> Option<CarbonCertificate> {
        let (tenant_id, certificate_id) = {
            let index = self.certificate_index.read().ok()?;
            *index.get(code)?
        };
        self.certificates.get(tenant_id, &certificate_id)
    }
}
