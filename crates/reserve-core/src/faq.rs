//! Static FAQ content.

pub struct FaqEntry {
  pub question: &'static str,
  pub answer:   &'static str,
}

/// The prompt the tool was designed from, published as the last FAQ answer.
pub const DESIGN_PROMPT: &str = "Contexte : Création d'une réserve de recrutement pour la SCP 329.02

Demande utilisateur :
- Outil de productivité pour gérer une réserve de recrutement
- Grand public, tous profils valorisés selon moyens de l'équipe bénévole
- Critères : motivation et curiosité
- Rien d'obligatoire sauf IBAN si cotisation crypto éthique (12,50€/an)
- Ouvert et évolutif
- Objectif : connecter les gens plutôt que faire chasseur de tête
- Transparence totale : ce prompt doit figurer dans la FAQ";

pub const FAQ: [FaqEntry; 5] = [
  FaqEntry {
    question: "C'est quoi la SCP 329.02 ?",
    answer:   "Une initiative collaborative ouverte à tous, portée par une équipe bénévole. \
               Notre mission : connecter les personnes plutôt que faire du recrutement \
               traditionnel.",
  },
  FaqEntry {
    question: "Comment sont évalués les profils ?",
    answer:   "Selon deux critères principaux : la motivation et la curiosité. L'évaluation \
               est faite selon les moyens disponibles de l'équipe bénévole, avec bienveillance \
               et ouverture.",
  },
  FaqEntry {
    question: "Qu'est-ce que la cotisation crypto éthique ?",
    answer:   "Une cotisation optionnelle de 12,50€/an qui soutient le projet. L'IBAN n'est \
               requis que si vous choisissez de cotiser.",
  },
  FaqEntry {
    question: "Mes données sont-elles sécurisées ?",
    answer:   "Vos données sont stockées localement sur votre machine. Rien n'est obligatoire \
               sauf l'IBAN pour les cotisants. Transparence totale : même le prompt de \
               création est public.",
  },
  FaqEntry {
    question: "Quel est le prompt initial de cet outil ?",
    answer:   DESIGN_PROMPT,
  },
];
