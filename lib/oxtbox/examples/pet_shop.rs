//! Builds a small class model, prints its closure and writes it as OWL/XML.
//!
//! Run with: cargo run -p oxtbox --example pet_shop

use oxtbox::{
    ClassExpression, ClassModel, ExportOptions, ObjectProperty, OwlClass, OwlXmlSerializer,
};

fn class(name: &str) -> Result<OwlClass, oxtbox::InvalidExpression> {
    OwlClass::new_from_iri(format!("http://example.org/{name}"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (animal, dog, cat) = (class("Animal")?, class("Dog")?, class("Cat")?);
    let owns = ObjectProperty::new_from_iri("http://example.org/owns")?;

    let mut model = ClassModel::new();
    for c in [&animal, &dog, &cat] {
        model.declare_class(c.clone());
    }
    model.declare_restriction(
        class("PetOwner")?,
        ClassExpression::object_some_values_from(
            owns,
            ClassExpression::object_union_of([dog.clone().into(), cat.clone().into()])?,
        ),
    )?;
    let outcomes = [
        model.declare_subclass(&dog, &animal)?,
        model.declare_subclass(&cat, &animal)?,
        model.declare_disjoint(&dog, &cat)?,
        // Contradicts Dog ⊑ Animal
        model.declare_equivalent(&animal, &dog)?,
    ];
    for conflict in outcomes.iter().filter_map(|declared| declared.conflict()) {
        println!("rejected: {conflict}");
    }

    for c in model.classes() {
        match model.expression_of(c) {
            Some(expression) => println!("{c} = {}", expression.dl()),
            None => println!("{c} sub classes: {:?}", model.sub_classes_of(c)),
        }
    }

    let graph = model.to_graph(&ExportOptions::default().with_inferred(true));
    println!("{} triples", graph.len());

    let xml = OwlXmlSerializer::new()
        .with_indent()
        .serialize_model(&model, Vec::new())?;
    println!("{}", String::from_utf8(xml)?);
    Ok(())
}
